//! Error types for the relational stores.

use recordkeep_core::CoreError;
use thiserror::Error;

/// Errors that can occur during relational store operations.
#[derive(Debug, Error)]
pub enum SqlError {
    /// Database error from SQLite, propagated unchanged.
    #[error("database error: {0}")]
    Backend(#[from] rusqlite::Error),

    /// Malformed record (e.g. a missing key field).
    #[error(transparent)]
    Record(#[from] CoreError),

    /// A table or column name that cannot be used as an identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The table does not exist in the backend.
    #[error("no such table: {0}")]
    NoSuchTable(String),

    /// The table has no column with this name.
    #[error("table {table} has no column named {column}")]
    NoSuchColumn { table: String, column: String },

    /// A lock guarding the backend was poisoned by a panicking thread.
    #[error("backend lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for relational store operations.
pub type Result<T> = std::result::Result<T, SqlError>;
