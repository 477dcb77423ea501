//! Error types for catalog construction.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while building a [`crate::FieldCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two descriptors share the same key.
    #[error("duplicate field key: {0}")]
    DuplicateKey(String),

    /// A descriptor has an empty key.
    #[error("field {label:?} has an empty key")]
    EmptyKey { label: String },

    /// The catalog JSON could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
