//! # pepper-plugin-core
//!
//! Descriptor model for out-of-process plugins hosted by pepperhost.
//!
//! This crate provides:
//! - `PluginDescriptor` and `MimeTypeEntry`, the records kept in the registry
//! - The permission bitmask granted to a plugin
//! - Version repair for the legacy multimedia plugin
//! - Builders for the two plugin kinds the host knows about
//!
//! ## Plugin Kinds
//!
//! - The legacy multimedia plugin ("Shockwave Flash"), described from a path
//!   and a possibly malformed version string.
//! - The content decryption module ("Widevine"), whose MIME type entry
//!   advertises the codecs it can decode.

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod mime;
pub mod permission;
pub mod version;

pub use builder::{
    build_content_decryption_descriptor, build_legacy_multimedia_descriptor, CodecSupport,
};
pub use descriptor::PluginDescriptor;
pub use error::{PluginError, PluginResult};
pub use mime::MimeTypeEntry;
pub use permission::Permissions;
pub use version::LegacyVersion;
