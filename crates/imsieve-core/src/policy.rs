//! Annotation policy
//!
//! Decides when a field write is needed and whether a reviewer already
//! annotated a record. Annotations accumulate across reviewers; the same
//! reviewer marking twice is a reported no-op.

use std::fmt;

use imsieve_bibtex::{Document, DocumentError, Record};

use crate::fields;

/// A reviewer's verdict on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a mark attempt. `AlreadyDone` is informational, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Written,
    AlreadyDone,
}

/// True unless both the abstract and the full-text link are already
/// populated.
pub fn should_enrich(record: &Record) -> bool {
    !(record.has_nonempty(fields::ABSTRACT) && record.has_nonempty(fields::FULL_TEXT_URL))
}

/// True iff the review field exists and contains `reviewer_id` as a
/// substring. Case-sensitive; no structured parsing of prior annotations.
pub fn already_reviewed_by(record: &Record, reviewer_id: &str) -> bool {
    record
        .get(fields::REVIEW)
        .is_some_and(|value| value.contains(reviewer_id))
}

/// Record `<reviewer_id>: <decision>,` in the review field, creating the
/// field when needed. No write occurs when the reviewer already annotated
/// this record; a prior annotation by a different reviewer is kept and the
/// new one is added alongside it.
pub fn mark_reviewed(
    doc: &mut Document,
    record: &Record,
    reviewer_id: &str,
    decision: Decision,
) -> Result<MarkOutcome, DocumentError> {
    if already_reviewed_by(record, reviewer_id) {
        return Ok(MarkOutcome::AlreadyDone);
    }
    let start = record.span.start;
    doc.add_field_if_absent(start, fields::REVIEW)?;
    let annotation = format!("{reviewer_id}: {decision},");
    doc.insert_at_field_start(start, fields::REVIEW, &annotation)?;
    Ok(MarkOutcome::Written)
}

/// Write `value` into `field` only if the field is still absent or empty at
/// write time. The record is reparsed here rather than trusted from an
/// earlier check.
pub fn write_if_absent(
    doc: &mut Document,
    record_start: usize,
    field: &str,
    value: &str,
) -> Result<bool, DocumentError> {
    let record = doc.record_at(record_start)?;
    if record.has_nonempty(field) {
        return Ok(false);
    }
    doc.add_field_if_absent(record_start, field)?;
    doc.insert_at_field_start(record_start, field, value)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsieve_bibtex::Field;

    const RECORD: &str = "@article{key1,\n  title = {T},\n}\n";

    fn record_with(fields: &[(&str, &str)]) -> Record {
        Record {
            key: "k".to_string(),
            entry_type: "article".to_string(),
            fields: fields
                .iter()
                .map(|(name, value)| Field {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            span: 0..0,
        }
    }

    #[test]
    fn test_should_enrich_unless_both_present() {
        assert!(should_enrich(&record_with(&[])));
        assert!(should_enrich(&record_with(&[("abstract", "text")])));
        assert!(should_enrich(&record_with(&[
            ("abstract", "text"),
            ("fullTextUrl", "  ")
        ])));
        assert!(!should_enrich(&record_with(&[
            ("abstract", "text"),
            ("fullTextUrl", "http://x")
        ])));
    }

    #[test]
    fn test_already_reviewed_by_is_substring_match() {
        let record = record_with(&[("review", "alice: accepted,")]);
        assert!(already_reviewed_by(&record, "alice"));
        assert!(!already_reviewed_by(&record, "bob"));
        // Case-sensitive by design.
        assert!(!already_reviewed_by(&record, "Alice"));
    }

    #[test]
    fn test_mark_reviewed_is_idempotent() {
        let mut doc = Document::new(RECORD);

        let record = doc.record_at(0).unwrap();
        let first = mark_reviewed(&mut doc, &record, "alice", Decision::Accepted).unwrap();
        assert_eq!(first, MarkOutcome::Written);
        let after_first = doc.record_at(0).unwrap().get("review").map(String::from);

        let record = doc.record_at(0).unwrap();
        let second = mark_reviewed(&mut doc, &record, "alice", Decision::Accepted).unwrap();
        assert_eq!(second, MarkOutcome::AlreadyDone);
        let after_second = doc.record_at(0).unwrap().get("review").map(String::from);

        assert_eq!(after_first.as_deref(), Some("alice: accepted,"));
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_annotations_accumulate_across_reviewers() {
        let mut doc = Document::new(RECORD);

        let record = doc.record_at(0).unwrap();
        mark_reviewed(&mut doc, &record, "alice", Decision::Accepted).unwrap();
        let record = doc.record_at(0).unwrap();
        mark_reviewed(&mut doc, &record, "bob", Decision::Rejected).unwrap();

        let review = doc.record_at(0).unwrap().get("review").unwrap().to_string();
        assert_eq!(review.matches("alice: accepted,").count(), 1);
        assert_eq!(review.matches("bob: rejected,").count(), 1);
    }

    #[test]
    fn test_write_if_absent_never_overwrites() {
        let mut doc = Document::new("@article{k,\n  abstract = {original},\n}\n");
        assert!(!write_if_absent(&mut doc, 0, "abstract", "replacement").unwrap());
        assert_eq!(doc.record_at(0).unwrap().get("abstract"), Some("original"));

        assert!(write_if_absent(&mut doc, 0, "fullTextUrl", "http://x/y.pdf").unwrap());
        assert_eq!(
            doc.record_at(0).unwrap().get("fullTextUrl"),
            Some("http://x/y.pdf")
        );
    }
}
