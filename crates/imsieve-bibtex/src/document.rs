//! The bibliography document: a text buffer with an ambient point
//!
//! The point is a byte offset into the text. Any routine that reads from the
//! document captures the point on entry and restores it on exit via
//! [`Document::with_point_preserved`]; only navigation persists a new point.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{DocumentError, Result};
use crate::parser::parse_record_at;
use crate::record::Record;

lazy_static! {
    /// A record begins with `@type{` at the start of a line.
    static ref BOUNDARY: Regex = Regex::new(r"(?m)^@[A-Za-z0-9]+\{").unwrap();
}

/// An in-memory bibliography document.
pub struct Document {
    text: String,
    point: usize,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            point: 0,
        }
    }

    /// Read a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Write the document text back to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.text)?;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn point(&self) -> usize {
        self.point
    }

    /// Move the point. Positions past the end clamp to the end.
    pub fn set_point(&mut self, pos: usize) {
        self.point = pos.min(self.text.len());
    }

    /// Run `f` with the point free to move, restoring the entry position on
    /// every exit path. Errors returned by `f` pass through unchanged.
    pub fn with_point_preserved<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.point;
        let out = f(self);
        self.point = saved.min(self.text.len());
        out
    }

    /// Splice `text` in at `pos`. The point shifts right if it sits at or
    /// after the insertion position.
    pub fn insert(&mut self, pos: usize, text: &str) {
        self.text.insert_str(pos, text);
        if self.point >= pos {
            self.point += text.len();
        }
    }

    /// Insert at the ambient point.
    pub fn insert_at_point(&mut self, text: &str) {
        let pos = self.point;
        self.insert(pos, text);
    }

    /// Start of the nearest record boundary at or before `pos`.
    pub fn boundary_at_or_before(&self, pos: usize) -> Option<usize> {
        let pos = pos.min(self.text.len());
        BOUNDARY
            .find_iter(&self.text)
            .map(|m| m.start())
            .take_while(|&start| start <= pos)
            .last()
    }

    /// Start of the nearest record boundary strictly before `pos`.
    pub fn boundary_before(&self, pos: usize) -> Option<usize> {
        let pos = pos.min(self.text.len());
        BOUNDARY
            .find_iter(&self.text)
            .map(|m| m.start())
            .take_while(|&start| start < pos)
            .last()
    }

    /// Start of the first record boundary at or after `pos`.
    pub fn boundary_at_or_after(&self, pos: usize) -> Option<usize> {
        let pos = pos.min(self.text.len());
        BOUNDARY
            .find_iter(&self.text)
            .map(|m| m.start())
            .find(|&start| start >= pos)
    }

    /// Parse the record at the nearest boundary at or before `pos`.
    ///
    /// The record is a transient view; any later edit invalidates its spans
    /// and callers must reparse.
    pub fn record_at(&self, pos: usize) -> Result<Record> {
        let boundary = self
            .boundary_at_or_before(pos)
            .ok_or(DocumentError::NoRecord { position: pos })?;
        parse_record_at(&self.text, boundary)
    }

    /// Parse the record at the ambient point.
    pub fn record_at_point(&self) -> Result<Record> {
        self.record_at(self.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "\
@article{key1,
  title = {First},
}

@article{key2,
  title = {Second},
}
";

    #[test]
    fn test_boundary_searches() {
        let doc = Document::new(TWO_RECORDS);
        let second = TWO_RECORDS.find("@article{key2").unwrap();

        assert_eq!(doc.boundary_at_or_before(0), Some(0));
        assert_eq!(doc.boundary_at_or_before(second + 3), Some(second));
        assert_eq!(doc.boundary_before(second), Some(0));
        assert_eq!(doc.boundary_before(0), None);
        assert_eq!(doc.boundary_at_or_after(1), Some(second));
        assert_eq!(doc.boundary_at_or_after(second + 1), None);
    }

    #[test]
    fn test_boundary_requires_line_start() {
        let doc = Document::new("see @misc{x, note = {inline}} and\n@article{real,\n}\n");
        // The inline `@misc{` is not at a line start and must not match.
        assert_eq!(doc.boundary_at_or_after(0), doc.text().find("@article"));
    }

    #[test]
    fn test_insert_shifts_point() {
        let mut doc = Document::new("abcdef");
        doc.set_point(4);
        doc.insert(2, "XY");
        assert_eq!(doc.text(), "abXYcdef");
        assert_eq!(doc.point(), 6);

        // Insertions after the point leave it alone.
        doc.insert(7, "Z");
        assert_eq!(doc.point(), 6);
    }

    #[test]
    fn test_with_point_preserved_restores_on_error() {
        let mut doc = Document::new(TWO_RECORDS);
        doc.set_point(3);
        let result: Result<()> = doc.with_point_preserved(|d| {
            d.set_point(20);
            Err(DocumentError::StartOfDocument)
        });
        assert!(result.is_err());
        assert_eq!(doc.point(), 3);
    }

    #[test]
    fn test_record_at_point() {
        let mut doc = Document::new(TWO_RECORDS);
        let second = TWO_RECORDS.find("@article{key2").unwrap();
        doc.set_point(second + 5);
        assert_eq!(doc.record_at_point().unwrap().key, "key2");
    }

    #[test]
    fn test_record_at_before_any_boundary() {
        let doc = Document::new("preamble text\n@article{key1,\n  title = {T},\n}\n");
        assert!(matches!(
            doc.record_at(3),
            Err(DocumentError::NoRecord { .. })
        ));
    }
}
