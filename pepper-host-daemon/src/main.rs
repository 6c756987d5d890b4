//! # pepper-host-daemon
//!
//! The pepperhost plugin host daemon.
//!
//! This daemon is responsible for:
//! - Registering out-of-process Pepper plugins from launch switches at startup
//! - Answering "is an internal plugin available for this MIME type" queries
//!   from peer processes
//! - Handling those queries on a single designated UI thread
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   pepper-host-daemon                      │
//! │                                                           │
//! │  ┌──────────────┐   Arc   ┌────────────────────────────┐  │
//! │  │   Plugin     │────────▶│  PluginQueryFilter         │  │
//! │  │   Registry   │         │  (runs on the UI thread)   │  │
//! │  └──────────────┘         └────────────────────────────┘  │
//! │                                       ▲                   │
//! │  ┌────────────────────────────────────┴───────────────┐   │
//! │  │              JSON-RPC API Server (TCP)             │   │
//! │  └────────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//!                               │
//!                ┌──────────────┴──────────────┐
//!                ▼                             ▼
//!         ┌────────────┐               ┌──────────────┐
//!         │  Renderer  │               │ Plugin host  │
//!         └────────────┘               └──────────────┘
//! ```
//!
//! ## Configuration
//!
//! The daemon reads configuration from `$XDG_CONFIG_HOME/pepperhost/config.toml`.
//!
//! ## Running
//!
//! ```bash
//! cargo run --bin pepper-host-daemon
//!
//! # With debug logging
//! RUST_LOG=debug cargo run --bin pepper-host-daemon
//! ```

use anyhow::Result;
use pepper_plugin_registry::{
    register_from_configuration, LocalFilesystem, MessageFilter, PluginQueryFilter, PluginRegistry,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pepper_host_daemon::api;
use pepper_host_daemon::api::handlers::ApiImpl;
use pepper_host_daemon::config::Config;
use pepper_host_daemon::content_client::HostInfo;
use pepper_host_daemon::ui_thread::UiThread;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first so it can set the log level.
    let (config, config_error) = match Config::load_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.daemon.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting pepper-host-daemon v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        None => info!("Loaded configuration from default path"),
        Some(e) => warn!("Failed to load config, using defaults: {:#}", e),
    }

    // Registration happens once, before anything can query the registry.
    let mut registry = PluginRegistry::new();
    let summary = register_from_configuration(
        &mut registry,
        &config.switches,
        &config.build,
        &LocalFilesystem,
    );
    for plugin in registry.list_plugins() {
        info!(
            "Plugin: {} v{} - {} ({})",
            plugin.name,
            plugin.version,
            plugin.description,
            plugin.mime_types.join(", ")
        );
    }
    info!("{} plugin(s) registered", summary.registered_count());

    let registry = Arc::new(registry);

    let ui_thread = UiThread::spawn("pepperhost-ui")?;
    let filter: Arc<dyn MessageFilter> = Arc::new(PluginQueryFilter::new(
        config.daemon.render_process_id,
        Arc::clone(&registry),
        config.build.plugin_host_process_enabled,
    ));
    let host_info = HostInfo::collect(&config.switches, &config.build);
    info!(
        "Host product {} with standard schemes {:?}",
        host_info.product, host_info.standard_schemes
    );

    let api = ApiImpl::new(filter, ui_thread.handle(), host_info);
    let (server_handle, addr) = api::start_server(&config.daemon.bind_address, api).await?;

    info!("Daemon startup complete");
    info!("Listening on: {}", addr);
    info!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");

    // Stopping the server drops the API, which queues the filter's
    // destruction on the UI thread; shutdown then drains that queue.
    server_handle.stop()?;
    server_handle.stopped().await;
    ui_thread.shutdown();

    info!("Daemon stopped");
    Ok(())
}
