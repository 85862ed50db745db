//! Error types for hw-core

use thiserror::Error;

/// Core error type for Headwater
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config '{field}': {message}")]
    ConfigInvalid { field: String, message: String },

    /// C004: Malformed dataset URN
    #[error("[C004] Invalid dataset URN '{urn}': {reason}")]
    InvalidUrn { urn: String, reason: String },

    /// C005: Malformed table identifier
    #[error("[C005] Invalid table identifier '{name}': expected schema.table or catalog.schema.table")]
    InvalidTableIdentifier { name: String },

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::ConfigInvalid`] on a named field
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::ConfigInvalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
