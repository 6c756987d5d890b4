//! JSON-RPC API module for the pepper-host-daemon.
//!
//! This module exposes the plugin capability query to peer processes
//! over a JSON-RPC interface via TCP.

pub mod handlers;
pub mod server;

pub use server::start_server;
