//! MIME type entries attached to a plugin descriptor.

use serde::{Deserialize, Serialize};

/// A MIME type served by a plugin, with optional extra key/value metadata.
///
/// Parameters are stored as two parallel sequences because that is the
/// shape they take on the wire. Use [`MimeTypeEntry::with_param`] to append
/// them so the two sequences stay the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeTypeEntry {
    /// Canonical MIME type, the lookup key.
    pub mime_type: String,

    /// Associated file extension, possibly empty.
    pub file_extension: String,

    /// Human-readable description.
    pub description: String,

    #[serde(default)]
    pub additional_param_names: Vec<String>,

    #[serde(default)]
    pub additional_param_values: Vec<String>,
}

impl MimeTypeEntry {
    /// Create an entry with no additional parameters.
    pub fn new(
        mime_type: impl Into<String>,
        file_extension: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            file_extension: file_extension.into(),
            description: description.into(),
            additional_param_names: Vec::new(),
            additional_param_values: Vec::new(),
        }
    }

    /// Append a parameter name/value pair.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_param_names.push(name.into());
        self.additional_param_values.push(value.into());
        self
    }

    /// Iterate over parameters as `(name, value)` pairs.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.additional_param_names
            .iter()
            .zip(&self.additional_param_values)
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Look up a parameter value by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Whether names and values have the same length.
    pub fn has_consistent_params(&self) -> bool {
        self.additional_param_names.len() == self.additional_param_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_param_keeps_lengths_equal() {
        let entry = MimeTypeEntry::new("application/x-test", "tst", "Test")
            .with_param("codecs", "vp8")
            .with_param("robustness", "sw");

        assert!(entry.has_consistent_params());
        assert_eq!(entry.additional_param_names.len(), 2);
        assert_eq!(entry.param("robustness"), Some("sw"));
        assert_eq!(entry.param("missing"), None);
    }

    #[test]
    fn test_inconsistent_params_detected() {
        let mut entry = MimeTypeEntry::new("application/x-test", "", "Test");
        entry.additional_param_names.push("codecs".to_string());
        assert!(!entry.has_consistent_params());
    }
}
