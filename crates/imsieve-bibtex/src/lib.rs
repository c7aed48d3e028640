//! BibTeX document model and field-update primitives
//!
//! This crate treats a bibliography as a live text document rather than a
//! parsed database: records are transient views materialized by parsing the
//! text at a position, and every field update is a splice into the text
//! itself. Re-parsing after each edit is the only read path, so a view can
//! never go stale.
//!
//! Features:
//! - Record-boundary search over the raw text (`^@type{` markers)
//! - Nom-based record parsing with byte-span tracking
//! - Case-insensitive field access, `=key=` pseudo-field
//! - In-place field writes and empty-field insertion

mod document;
mod error;
pub mod parser;
mod record;
mod write;

pub use document::Document;
pub use error::{DocumentError, Result};
pub use record::{Field, Record};
