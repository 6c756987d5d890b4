//! # pepper-plugin-registry
//!
//! Registration and lookup of out-of-process plugins.
//!
//! This crate provides:
//!
//! - The ordered `PluginRegistry` built once at process startup
//! - Registration of the known plugin kinds from launch switches
//! - `PluginQueryFilter`, which answers "is an internal plugin available
//!   for this MIME type" requests from peer processes
//!
//! ## Lifecycle
//!
//! The registry is filled on the startup thread, then frozen behind an
//! `Arc` and handed to whichever component serves queries. Nothing is
//! registered or removed after that point.

pub mod features;
pub mod query;
pub mod registration;
pub mod registry;
pub mod switches;

pub use features::BuildFeatures;
pub use query::{HostMessage, HostReply, MessageFilter, MimeTypeAvailability, PluginQueryFilter};
pub use registration::{
    register_from_configuration, Registration, RegistrationSummary, SkipReason,
};
pub use registry::{PluginInfo, PluginRegistry};
pub use switches::{LocalFilesystem, PathProbe, SwitchSource};
