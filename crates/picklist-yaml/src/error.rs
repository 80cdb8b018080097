//! Error types for manifest loading.

use thiserror::Error;

/// Errors that can occur while loading or validating a select manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Manifest is structurally incomplete
    #[error("Validation error: {0}")]
    Validation(String),

    /// Preset name is not one of the known presets
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A field holds an unusable value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl ManifestError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
