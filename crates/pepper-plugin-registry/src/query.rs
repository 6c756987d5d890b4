//! Capability queries arriving from peer processes.
//!
//! A peer (renderer or plugin host) sends a `HostMessage`; the filter either
//! handles it and produces a `HostReply`, or leaves it for another filter.

use crate::registry::{PluginInfo, PluginRegistry};
use pepper_plugin_core::MimeTypeEntry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Response to an availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MimeTypeAvailability {
    pub is_available: bool,
    pub additional_param_names: Vec<String>,
    pub additional_param_values: Vec<String>,
}

impl MimeTypeAvailability {
    /// No plugin serves the queried type.
    pub fn unavailable() -> Self {
        Self {
            is_available: false,
            additional_param_names: Vec::new(),
            additional_param_values: Vec::new(),
        }
    }

    /// A plugin serves the type through `entry`.
    pub fn from_entry(entry: &MimeTypeEntry) -> Self {
        Self {
            is_available: true,
            additional_param_names: entry.additional_param_names.clone(),
            additional_param_values: entry.additional_param_values.clone(),
        }
    }
}

/// Requests a peer process may send to the plugin host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Is an internal plugin available for `mime_type`?
    IsInternalPluginAvailableForMimeType { mime_type: String },

    /// List the internal plugins.
    GetInternalPlugins,
}

/// Replies produced by a message filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum HostReply {
    Availability(MimeTypeAvailability),
    Plugins(Vec<PluginInfo>),
}

/// Handles a subset of the messages arriving on a channel.
pub trait MessageFilter: Send + Sync {
    /// Handle `message`, or return `None` to leave it unhandled.
    fn on_message_received(&self, message: &HostMessage) -> Option<HostReply>;
}

/// Answers plugin capability queries from the frozen registry.
#[derive(Debug, Clone)]
pub struct PluginQueryFilter {
    render_process_id: i32,
    registry: Arc<PluginRegistry>,
    cdm_messages_enabled: bool,
}

impl PluginQueryFilter {
    /// Create a filter serving the peer `render_process_id`.
    ///
    /// When `cdm_messages_enabled` is false availability queries are left
    /// unhandled, matching a host built without Pepper CDM support.
    pub fn new(
        render_process_id: i32,
        registry: Arc<PluginRegistry>,
        cdm_messages_enabled: bool,
    ) -> Self {
        Self {
            render_process_id,
            registry,
            cdm_messages_enabled,
        }
    }

    pub fn render_process_id(&self) -> i32 {
        self.render_process_id
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Look up `mime_type` in the registry.
    pub fn is_internal_plugin_available_for_mime_type(
        &self,
        mime_type: &str,
    ) -> MimeTypeAvailability {
        debug!(
            render_process_id = self.render_process_id,
            mime_type,
            plugins = self.registry.len(),
            "Checking internal plugin availability"
        );

        for plugin in self.registry.iter() {
            for entry in &plugin.mime_types {
                debug!(
                    mime_type = %entry.mime_type,
                    params = ?entry.additional_param_names,
                    values = ?entry.additional_param_values,
                    "Candidate MIME type"
                );
            }
        }

        let availability = self.registry.query_availability(mime_type);
        debug!(
            mime_type,
            is_available = availability.is_available,
            "Availability query answered"
        );
        availability
    }
}

impl MessageFilter for PluginQueryFilter {
    fn on_message_received(&self, message: &HostMessage) -> Option<HostReply> {
        match message {
            HostMessage::IsInternalPluginAvailableForMimeType { mime_type } => {
                if !self.cdm_messages_enabled {
                    return None;
                }
                Some(HostReply::Availability(
                    self.is_internal_plugin_available_for_mime_type(mime_type),
                ))
            }
            HostMessage::GetInternalPlugins => {
                Some(HostReply::Plugins(self.registry.list_plugins()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepper_plugin_core::{build_content_decryption_descriptor, CodecSupport};
    use std::path::Path;

    fn registry_with_cdm() -> Arc<PluginRegistry> {
        let mut registry = PluginRegistry::new();
        registry
            .register(build_content_decryption_descriptor(
                Path::new("/opt/cdm.so"),
                "1.4.8.824",
                CodecSupport::default(),
            ))
            .unwrap();
        Arc::new(registry)
    }

    #[test]
    fn test_availability_handled() {
        let filter = PluginQueryFilter::new(7, registry_with_cdm(), true);
        let reply = filter.on_message_received(&HostMessage::IsInternalPluginAvailableForMimeType {
            mime_type: "application/x-ppapi-widevine-cdm".to_string(),
        });

        match reply {
            Some(HostReply::Availability(availability)) => {
                assert!(availability.is_available);
                assert_eq!(availability.additional_param_values, vec!["vorbis,vp8,vp9.0"]);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_availability_unhandled_without_cdm_support() {
        let filter = PluginQueryFilter::new(7, registry_with_cdm(), false);
        let reply = filter.on_message_received(&HostMessage::IsInternalPluginAvailableForMimeType {
            mime_type: "application/x-ppapi-widevine-cdm".to_string(),
        });
        assert!(reply.is_none());

        // Listing is always handled.
        assert!(filter
            .on_message_received(&HostMessage::GetInternalPlugins)
            .is_some());
    }

    #[test]
    fn test_availability_wire_format() {
        let json = serde_json::to_value(MimeTypeAvailability::unavailable()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isAvailable": false,
                "additionalParamNames": [],
                "additionalParamValues": [],
            })
        );
    }

    #[test]
    fn test_message_wire_format() {
        let message: HostMessage = serde_json::from_str(
            r#"{"type": "is_internal_plugin_available_for_mime_type", "mime_type": "video/webm"}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            HostMessage::IsInternalPluginAvailableForMimeType {
                mime_type: "video/webm".to_string()
            }
        );
    }
}
