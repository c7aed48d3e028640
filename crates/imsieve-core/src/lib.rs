//! Review core for imsieve
//!
//! Screens bibliography entries for a systematic literature review: walks
//! the records of a BibTeX document, enriches each with an abstract and a
//! full-text link fetched from the entry's source site, and records the
//! reviewer's accept/reject decision without ever duplicating a prior
//! annotation.
//!
//! The document itself lives in [`imsieve_bibtex`]; this crate owns the
//! review semantics: the annotation policy, the per-site fetcher registry,
//! the enrichment orchestrator, and the navigator that ties them to a
//! display surface.

pub mod config;
pub mod display;
pub mod enrich;
mod error;
pub mod fields;
pub mod http;
pub mod navigate;
pub mod policy;
pub mod sites;

pub use config::{ConfigError, ReviewConfig};
pub use display::{render_record, DisplaySurface, StringDisplay};
pub use enrich::{EnrichError, EnrichOutcome, Enricher};
pub use error::{Result, SieveError};
pub use http::{Fetch, HttpClient, HttpError, HttpResponse, NoFetch};
pub use navigate::{summarize, Navigator, ReviewSummary};
pub use policy::{Decision, MarkOutcome};

pub use imsieve_bibtex::{Document, DocumentError, Record};
