//! Plugin descriptors.
//!
//! A descriptor records one installable plugin binary and the MIME types it
//! serves. Descriptors are built once at startup and never change afterwards.

use crate::error::{PluginError, PluginResult};
use crate::mime::MimeTypeEntry;
use crate::permission::Permissions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata describing an out-of-process plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Display name.
    pub name: String,

    /// Location of the plugin binary.
    pub path: PathBuf,

    /// Version string.
    pub version: String,

    /// Human-readable description, usually name plus version.
    pub description: String,

    /// Whether the plugin runs in its own process.
    pub is_out_of_process: bool,

    /// Permissions granted to the plugin.
    pub permissions: Permissions,

    /// MIME types served, in declaration order.
    pub mime_types: Vec<MimeTypeEntry>,
}

impl PluginDescriptor {
    /// Validate the structural invariants of the descriptor.
    pub fn validate(&self) -> PluginResult<()> {
        if self.name.is_empty() {
            return Err(PluginError::InvalidDescriptor(
                "Plugin name cannot be empty".to_string(),
            ));
        }

        if self.path.as_os_str().is_empty() {
            return Err(PluginError::InvalidDescriptor(format!(
                "Plugin '{}' has an empty path",
                self.name
            )));
        }

        if self.mime_types.is_empty() {
            return Err(PluginError::InvalidDescriptor(format!(
                "Plugin '{}' declares no MIME types",
                self.name
            )));
        }

        for entry in &self.mime_types {
            if !entry.has_consistent_params() {
                return Err(PluginError::MismatchedParams {
                    mime_type: entry.mime_type.clone(),
                    names: entry.additional_param_names.len(),
                    values: entry.additional_param_values.len(),
                });
            }
        }

        Ok(())
    }

    /// First entry declared for `mime_type`, if any.
    pub fn mime_type_entry(&self, mime_type: &str) -> Option<&MimeTypeEntry> {
        self.mime_types.iter().find(|m| m.mime_type == mime_type)
    }

    /// Whether this plugin serves `mime_type`.
    pub fn supports_mime_type(&self, mime_type: &str) -> bool {
        self.mime_type_entry(mime_type).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> PluginDescriptor {
        PluginDescriptor {
            name: "Test Plugin".to_string(),
            path: PathBuf::from("/opt/test/libtest.so"),
            version: "1.0".to_string(),
            description: "Test Plugin 1.0".to_string(),
            is_out_of_process: true,
            permissions: Permissions::empty(),
            mime_types: vec![
                MimeTypeEntry::new("application/x-test", "tst", "Test"),
                MimeTypeEntry::new("application/x-test", "tst2", "Shadowed"),
            ],
        }
    }

    #[test]
    fn test_valid_descriptor() {
        assert!(descriptor().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut d = descriptor();
        d.name.clear();
        assert!(matches!(d.validate(), Err(PluginError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut d = descriptor();
        d.path = PathBuf::new();
        assert!(matches!(d.validate(), Err(PluginError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_no_mime_types_rejected() {
        let mut d = descriptor();
        d.mime_types.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_mismatched_params_rejected() {
        let mut d = descriptor();
        d.mime_types[0].additional_param_values.push("orphan".to_string());

        match d.validate() {
            Err(PluginError::MismatchedParams { names, values, .. }) => {
                assert_eq!(names, 0);
                assert_eq!(values, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_mime_type_entry_first_declared_wins() {
        let d = descriptor();
        let entry = d.mime_type_entry("application/x-test").unwrap();
        assert_eq!(entry.file_extension, "tst");
        assert!(!d.supports_mime_type("application/pdf"));
    }
}
