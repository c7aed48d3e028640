//! Error types for the review core

use thiserror::Error;

use crate::config::ConfigError;
use crate::enrich::EnrichError;
use imsieve_bibtex::DocumentError;

/// Result type alias for review operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Main error type for review operations
#[derive(Error, Debug)]
pub enum SieveError {
    /// Document parsing, navigation, or field-write errors
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Enrichment errors
    #[error("enrichment error: {0}")]
    Enrich(#[from] EnrichError),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
