//! Review navigator
//!
//! Steps a persisted cursor through the record sequence, enriching and
//! rendering each record as it becomes current. The persisted cursor rests
//! just past the current record's boundary, so moving back is two backward
//! boundary steps (the first reaches the current record's start, the second
//! the previous record's) and a reparse is a single backward step.
//!
//! The navigator is the only writer of the persisted document cursor; every
//! other document access restores the point it found.

use std::path::Path;

use tracing::{debug, warn};

use imsieve_bibtex::{Document, DocumentError, Record};

use crate::config::ReviewConfig;
use crate::display::{render_record, DisplaySurface};
use crate::enrich::{EnrichError, Enricher};
use crate::error::Result;
use crate::fields;
use crate::http::Fetch;
use crate::policy::{self, Decision, MarkOutcome};

pub struct Navigator<D: DisplaySurface> {
    doc: Document,
    cursor: usize,
    config: ReviewConfig,
    fetch: Box<dyn Fetch>,
    display: D,
}

impl<D: DisplaySurface> Navigator<D> {
    /// A fresh navigator starts before the first record; the first call to
    /// [`Navigator::next`] makes it current.
    pub fn new(doc: Document, config: ReviewConfig, fetch: Box<dyn Fetch>, display: D) -> Self {
        Self {
            doc,
            cursor: 0,
            config,
            fetch,
            display,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Move to the next record, enrich it, and refresh the display. When no
    /// record follows, fails with [`DocumentError::EndOfDocument`] and the
    /// cursor and display are left untouched.
    pub fn next(&mut self) -> Result<Record> {
        let boundary = self
            .doc
            .boundary_at_or_after(self.cursor)
            .ok_or(DocumentError::EndOfDocument)?;
        self.advance_to(boundary)
    }

    /// Move to the previous record: two backward boundary steps, then
    /// enrich and refresh. Fails with [`DocumentError::StartOfDocument`]
    /// when fewer than two boundaries precede the cursor.
    pub fn prev(&mut self) -> Result<Record> {
        let current = self
            .doc
            .boundary_before(self.cursor)
            .ok_or(DocumentError::StartOfDocument)?;
        let previous = self
            .doc
            .boundary_before(current)
            .ok_or(DocumentError::StartOfDocument)?;
        self.advance_to(previous)
    }

    /// Re-parse the current record without moving the persisted cursor.
    /// Used after an in-place edit to get a fresh view.
    pub fn reparse(&self) -> Result<Record> {
        let boundary = self
            .doc
            .boundary_before(self.cursor)
            .ok_or(DocumentError::StartOfDocument)?;
        Ok(self.doc.record_at(boundary)?)
    }

    pub fn accept_current(&mut self) -> Result<MarkOutcome> {
        self.mark(Decision::Accepted)
    }

    pub fn reject_current(&mut self) -> Result<MarkOutcome> {
        self.mark(Decision::Rejected)
    }

    /// Tally review annotations across the whole document.
    pub fn summary(&mut self) -> Result<ReviewSummary> {
        Ok(summarize(&mut self.doc)?)
    }

    /// Write the document (with any annotations and enrichments) back out.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(self.doc.save(path)?)
    }

    fn mark(&mut self, decision: Decision) -> Result<MarkOutcome> {
        let record = self.reparse()?;
        let outcome = policy::mark_reviewed(
            &mut self.doc,
            &record,
            &self.config.reviewer_id,
            decision,
        )?;
        debug!(key = %record.key, %decision, ?outcome, "mark");
        Ok(outcome)
    }

    fn advance_to(&mut self, boundary: usize) -> Result<Record> {
        // Validate before persisting anything: a malformed record aborts
        // navigation with the cursor and display unchanged.
        self.doc.record_at(boundary)?;

        self.cursor = boundary + 1;
        self.doc.set_point(self.cursor);
        self.enrich_current(boundary);

        let record = self.doc.record_at(boundary)?;
        render_record(&mut self.display, &record);
        Ok(record)
    }

    /// Best-effort: a reviewer can always accept or reject even when the
    /// fetch fails, so nothing here is surfaced as an error.
    fn enrich_current(&mut self, boundary: usize) {
        let enricher = Enricher::new(self.fetch.as_ref());
        match enricher.enrich(&mut self.doc, boundary) {
            Ok(outcome) => debug!(?outcome, "enrichment pass"),
            Err(EnrichError::NotSupported { domain }) => {
                debug!(%domain, "no fetcher registered, leaving record unenriched");
            }
            Err(err) => warn!(error = %err, "enrichment failed, record left as-is"),
        }
    }
}

/// Review annotation counts for a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub reviewed: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Walk every record and tally annotations. Restores the document point it
/// entered with.
pub fn summarize(doc: &mut Document) -> std::result::Result<ReviewSummary, DocumentError> {
    doc.with_point_preserved(|doc| {
        let mut summary = ReviewSummary::default();
        let mut pos = 0;
        while let Some(boundary) = doc.boundary_at_or_after(pos) {
            doc.set_point(boundary + 1);
            let record = doc.record_at_point()?;
            summary.total += 1;
            if let Some(review) = record.get(fields::REVIEW) {
                if !review.trim().is_empty() {
                    summary.reviewed += 1;
                }
                if review.contains(Decision::Accepted.as_str()) {
                    summary.accepted += 1;
                }
                if review.contains(Decision::Rejected.as_str()) {
                    summary.rejected += 1;
                }
            }
            pos = boundary + 1;
        }
        Ok(summary)
    })
}
