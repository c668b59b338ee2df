//! Error types for recordkeep core.

use thiserror::Error;

/// Errors raised while building or converting records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record lacks a field the store uses as (part of) its key.
    #[error("record is missing key field `{0}`")]
    MissingKeyField(String),

    /// A field holds something that is not a scalar.
    #[error("field `{field}` holds an unsupported value: {reason}")]
    UnsupportedValue { field: String, reason: String },

    /// Conversion between a record and a typed value failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
