//! Error types for document and record operations

use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors raised by document parsing, navigation, and field writes
#[derive(Error, Debug)]
pub enum DocumentError {
    /// No record boundary at or before the given position
    #[error("no record found before position {position}")]
    NoRecord { position: usize },

    /// Record structure could not be parsed
    #[error("malformed record: {message}")]
    Parse { message: String },

    /// Write target field is not present in the record
    #[error("field not found: {field}")]
    FieldNotFound { field: String },

    /// Backward navigation ran out of records
    #[error("already at the first record")]
    StartOfDocument,

    /// Forward navigation ran out of records
    #[error("no further records")]
    EndOfDocument,

    /// Underlying file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
