//! Error types for plugin descriptors.

use thiserror::Error;

/// Errors raised when a descriptor breaks one of its structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// Descriptor is missing a required field.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// A MIME type entry carries parameter names and values of different lengths.
    #[error("MIME type '{mime_type}' has {names} parameter names but {values} values")]
    MismatchedParams {
        mime_type: String,
        names: usize,
        values: usize,
    },
}

/// Result type for descriptor operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;
