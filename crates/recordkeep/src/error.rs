//! Error type spanning every recordkeep store.

use recordkeep_core::CoreError;
use recordkeep_sql::SqlError;
use recordkeep_xml::XmlError;
use thiserror::Error;

/// Errors from any recordkeep store.
#[derive(Debug, Error)]
pub enum Error {
    /// Record conversion or key error.
    #[error("record error: {0}")]
    Core(#[from] CoreError),

    /// Relational store error.
    #[error("sql store error: {0}")]
    Sql(#[from] SqlError),

    /// XML store error.
    #[error("xml store error: {0}")]
    Xml(#[from] XmlError),
}

/// Result type for code mixing recordkeep stores.
pub type Result<T> = std::result::Result<T, Error>;
