//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing presets.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error from a filesystem backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob is not valid JSON, or a config failed to encode.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blob parsed but does not have the preset structure.
    #[error("invalid preset data: {0}")]
    Invalid(String),

    /// A blob name that cannot be mapped onto the backend.
    #[error("invalid blob name: {0:?}")]
    InvalidName(String),
}

/// Result type for settings loading.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised by the strict settings loader.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}
