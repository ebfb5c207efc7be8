//! Core error types for changelog-core.
//!
//! The estimation engine itself is total and never returns errors. These
//! types cover the boundaries around it: loading records from disk and
//! reading or writing the configuration file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for changelog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record validation errors at the record-store boundary
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised while turning serialized records into [`ChangeRecord`]s.
///
/// [`ChangeRecord`]: crate::record::ChangeRecord
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// A timestamp field could not be parsed
    #[error("Record '{id}' has an invalid {field} timestamp: '{value}'")]
    InvalidTimestamp {
        id: String,
        field: &'static str,
        value: String,
    },

    /// Two records share the same id within one load
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    /// A required field is empty
    #[error("Record '{id}' is missing required field '{field}'")]
    MissingField { id: String, field: &'static str },
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(ConfigError::ParseFailed(err.to_string()))
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Custom(format!("TOML serialization failed: {err}"))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
