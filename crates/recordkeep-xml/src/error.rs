//! Error types for the XML store.

use thiserror::Error;

/// Errors that can occur during XML store operations.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Reading or writing the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// The document parsed but has no usable structure.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A record element lacks one of the configured key attributes.
    #[error("<{element}> record at position {position} is missing key attribute `{attribute}`")]
    MissingKeyAttribute {
        element: String,
        attribute: String,
        position: usize,
    },
}

/// Result type for XML store operations.
pub type Result<T> = std::result::Result<T, XmlError>;
