//! Registry of plugin descriptors.
//!
//! The registry is an ordered list: registration order decides which plugin
//! answers a MIME type query when several declare the same type.

use crate::query::MimeTypeAvailability;
use pepper_plugin_core::{PluginDescriptor, PluginResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Registry for out-of-process plugin descriptors.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    /// Descriptors in registration order.
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Append a descriptor after checking its invariants.
    pub fn register(&mut self, descriptor: PluginDescriptor) -> PluginResult<()> {
        descriptor.validate()?;

        info!(
            "Registered plugin: {} v{} at {:?}",
            descriptor.name, descriptor.version, descriptor.path
        );

        self.plugins.push(descriptor);
        Ok(())
    }

    /// Answer a capability query for `mime_type`.
    ///
    /// Plugins are scanned in registration order and their MIME types in
    /// declaration order; the first exact match wins. An unknown or
    /// malformed MIME type simply does not match.
    pub fn query_availability(&self, mime_type: &str) -> MimeTypeAvailability {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.mime_types.iter())
            .find(|entry| entry.mime_type == mime_type)
            .map(MimeTypeAvailability::from_entry)
            .unwrap_or_else(MimeTypeAvailability::unavailable)
    }

    /// Get the descriptors in registration order.
    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter()
    }

    /// Get the number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// List plugin information.
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(PluginInfo::from).collect()
    }
}

/// Summary of a registered plugin, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub path: PathBuf,
    pub permissions: u32,
    pub mime_types: Vec<String>,
}

impl From<&PluginDescriptor> for PluginInfo {
    fn from(d: &PluginDescriptor) -> Self {
        Self {
            name: d.name.clone(),
            version: d.version.clone(),
            description: d.description.clone(),
            path: d.path.clone(),
            permissions: d.permissions.bits(),
            mime_types: d.mime_types.iter().map(|m| m.mime_type.clone()).collect(),
        }
    }
}
