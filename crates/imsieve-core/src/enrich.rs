//! Enrichment orchestrator
//!
//! Fills the abstract and full-text-link fields of a record from its source
//! site. The links fetch must succeed before the abstract fetch is
//! attempted, and both before any field write, so a failure anywhere leaves
//! the record exactly as it was.

use thiserror::Error;
use tracing::debug;

use imsieve_bibtex::{Document, DocumentError};

use crate::fields;
use crate::http::Fetch;
use crate::policy;
use crate::sites::{self, FetchError, MalformedUrl};

/// Enrichment failures. All of them are non-fatal to a review session: the
/// record keeps whatever fields it already had.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Record lacks a url field, so there is no source to fetch from
    #[error("record has no url field")]
    MissingUrl,

    /// The url field has no extractable host
    #[error(transparent)]
    MalformedUrl(#[from] MalformedUrl),

    /// No fetcher registered for the record's source domain
    #[error("no fetcher registered for domain {domain}")]
    NotSupported { domain: String },

    /// Network failure or expected pattern absent on a fetched page
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Field write failed
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// What an enrichment pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// Both fields were already populated; no fetch was issued
    AlreadyComplete,
    /// The two-step fetch ran; each flag reports whether the field was
    /// still absent at write time
    Enriched {
        wrote_abstract: bool,
        wrote_full_text: bool,
    },
}

pub struct Enricher<'a> {
    fetch: &'a dyn Fetch,
}

impl<'a> Enricher<'a> {
    pub fn new(fetch: &'a dyn Fetch) -> Self {
        Self { fetch }
    }

    /// Enrich the record beginning at `record_start`.
    pub fn enrich(
        &self,
        doc: &mut Document,
        record_start: usize,
    ) -> Result<EnrichOutcome, EnrichError> {
        let record = doc.record_at(record_start)?;
        if !policy::should_enrich(&record) {
            return Ok(EnrichOutcome::AlreadyComplete);
        }

        let url = record
            .get(fields::URL)
            .ok_or(EnrichError::MissingUrl)?
            .trim()
            .to_string();
        let domain = sites::registrable_domain(&url)?;
        let site = sites::lookup(&domain).ok_or_else(|| EnrichError::NotSupported {
            domain: domain.clone(),
        })?;

        debug!(%url, %domain, "fetching links");
        let links = (site.fetch_links)(self.fetch, &url)?;
        debug!(url = %links.abstract_url, "fetching abstract");
        let abstract_text = (site.fetch_abstract)(self.fetch, &links.abstract_url)?;

        // Both fetches are complete; each field is re-checked at write time.
        let wrote_abstract =
            policy::write_if_absent(doc, record_start, fields::ABSTRACT, &abstract_text)?;
        let wrote_full_text =
            policy::write_if_absent(doc, record_start, fields::FULL_TEXT_URL, &links.full_text_url)?;

        Ok(EnrichOutcome::Enriched {
            wrote_abstract,
            wrote_full_text,
        })
    }
}
