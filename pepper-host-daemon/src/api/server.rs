//! JSON-RPC server implementation for pepper-host-daemon.
//!
//! This module provides the server that listens on TCP localhost and handles
//! incoming JSON-RPC requests from peer processes.

use anyhow::{Context, Result};
use jsonrpsee::server::{Server, ServerHandle};
use tracing::info;

use super::handlers::{ApiImpl, PepperHostApiServer};

/// Start the JSON-RPC API server on `bind_address`.
///
/// Returns a handle that can be used to gracefully shut down the server,
/// and the address it is actually listening on (useful with port 0).
pub async fn start_server(
    bind_address: &str,
    api: ApiImpl,
) -> Result<(ServerHandle, std::net::SocketAddr)> {
    info!("Starting JSON-RPC server on {}", bind_address);

    let server = Server::builder()
        .build(bind_address)
        .await
        .with_context(|| format!("Failed to build JSON-RPC server on {}", bind_address))?;

    let addr = server
        .local_addr()
        .context("Failed to get server address")?;
    info!("JSON-RPC server listening on {}", addr);

    let handle = server.start(api.into_rpc());

    info!("JSON-RPC server started successfully");

    Ok((handle, addr))
}
