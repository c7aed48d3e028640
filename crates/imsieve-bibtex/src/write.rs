//! In-place field writes
//!
//! Writes splice text into the document, so any previously parsed record
//! spans are stale afterwards. Both operations reparse the record
//! themselves and leave the ambient point where they found it.

use regex::Regex;

use crate::document::Document;
use crate::error::{DocumentError, Result};

impl Document {
    /// Insert `content` at the start of `field`'s value region, located by
    /// the field's opening-delimiter pattern within the record beginning at
    /// `record_start`. Existing value text is pushed right, never replaced.
    ///
    /// Fails with [`DocumentError::FieldNotFound`] when the field's region
    /// cannot be located; callers add the field first.
    pub fn insert_at_field_start(
        &mut self,
        record_start: usize,
        field: &str,
        content: &str,
    ) -> Result<()> {
        self.with_point_preserved(|doc| {
            let record = doc.record_at(record_start)?;
            let pattern = value_start_pattern(field);
            let value_start = {
                let region = &doc.text()[record.span.clone()];
                let found = pattern
                    .find(region)
                    .ok_or_else(|| DocumentError::FieldNotFound {
                        field: field.to_string(),
                    })?;
                record.span.start + found.end()
            };
            doc.set_point(value_start);
            doc.insert_at_point(content);
            Ok(())
        })
    }

    /// Ensure `field` exists in the record beginning at `record_start`,
    /// inserting an empty `field = {},` placeholder when absent. Returns
    /// `true` if the field was added, `false` if it was already present.
    pub fn add_field_if_absent(&mut self, record_start: usize, field: &str) -> Result<bool> {
        self.with_point_preserved(|doc| {
            let record = doc.record_at(record_start)?;
            if record.has(field) {
                return Ok(false);
            }
            let key_comma = doc.text()[record.span.clone()].find(',');
            match key_comma {
                // After the cite-key comma.
                Some(comma) => {
                    doc.set_point(record.span.start + comma + 1);
                    doc.insert_at_point(&format!("\n  {field} = {{}},"));
                }
                // Fieldless record: before the closing brace.
                None => {
                    doc.set_point(record.span.end - 1);
                    doc.insert_at_point(&format!(",\n  {field} = {{}}\n"));
                }
            }
            Ok(true)
        })
    }
}

/// `name = {` or `name = "`, case-insensitive.
fn value_start_pattern(field: &str) -> Regex {
    Regex::new(&format!(r#"(?i)\b{}\s*=\s*["{{]"#, regex::escape(field)))
        .expect("escaped field name always forms a valid pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "@article{key1,\n  title = {A Study},\n  review = {},\n}\n";

    #[test]
    fn test_insert_at_field_start_fills_empty_field() {
        let mut doc = Document::new(RECORD);
        doc.insert_at_field_start(0, "review", "alice: accepted,").unwrap();
        let record = doc.record_at(0).unwrap();
        assert_eq!(record.get("review"), Some("alice: accepted,"));
    }

    #[test]
    fn test_insert_at_field_start_prepends() {
        let mut doc = Document::new(RECORD);
        doc.insert_at_field_start(0, "review", "alice: accepted,").unwrap();
        doc.insert_at_field_start(0, "review", "bob: rejected,").unwrap();
        let record = doc.record_at(0).unwrap();
        assert_eq!(record.get("review"), Some("bob: rejected,alice: accepted,"));
    }

    #[test]
    fn test_insert_at_field_start_is_case_insensitive() {
        let mut doc = Document::new("@article{k,\n  FullTextUrl = {},\n}\n");
        doc.insert_at_field_start(0, "fullTextUrl", "http://x/y.pdf").unwrap();
        let record = doc.record_at(0).unwrap();
        assert_eq!(record.get("fullTextUrl"), Some("http://x/y.pdf"));
    }

    #[test]
    fn test_insert_missing_field_fails() {
        let mut doc = Document::new(RECORD);
        let result = doc.insert_at_field_start(0, "abstract", "text");
        assert!(matches!(
            result,
            Err(DocumentError::FieldNotFound { ref field }) if field == "abstract"
        ));
    }

    #[test]
    fn test_add_field_if_absent() {
        let mut doc = Document::new(RECORD);
        assert!(doc.add_field_if_absent(0, "abstract").unwrap());
        let record = doc.record_at(0).unwrap();
        assert!(record.has("abstract"));
        assert!(!record.has_nonempty("abstract"));
        // Existing fields are untouched.
        assert_eq!(record.get("title"), Some("A Study"));
    }

    #[test]
    fn test_add_field_if_absent_is_noop_when_present() {
        let mut doc = Document::new(RECORD);
        let before = doc.text().to_string();
        assert!(!doc.add_field_if_absent(0, "title").unwrap());
        assert_eq!(doc.text(), before);
    }

    #[test]
    fn test_add_field_to_fieldless_record() {
        let mut doc = Document::new("@misc{lonely}\n");
        assert!(doc.add_field_if_absent(0, "review").unwrap());
        let record = doc.record_at(0).unwrap();
        assert!(record.has("review"));
        assert_eq!(record.key, "lonely");
    }

    #[test]
    fn test_writes_do_not_disturb_point() {
        let mut doc = Document::new(RECORD);
        doc.set_point(5);
        doc.add_field_if_absent(0, "abstract").unwrap();
        doc.insert_at_field_start(0, "abstract", "some text").unwrap();
        assert_eq!(doc.point(), 5);
    }

    #[test]
    fn test_write_into_second_record_leaves_first_alone() {
        let text = format!("{RECORD}\n@article{{key2,\n  review = {{}},\n}}\n");
        let second = text.find("@article{key2").unwrap();
        let mut doc = Document::new(text);
        doc.insert_at_field_start(second, "review", "alice: rejected,").unwrap();
        assert_eq!(doc.record_at(0).unwrap().get("review"), Some(""));
        assert_eq!(
            doc.record_at(second).unwrap().get("review"),
            Some("alice: rejected,")
        );
    }
}
