//! Display surface
//!
//! A clearable, insertable text region with its own cursor, kept separate
//! from the document point so parsing never disturbs the reviewer's place.

use imsieve_bibtex::Record;

pub trait DisplaySurface {
    fn clear(&mut self);
    fn insert(&mut self, text: &str);
}

/// In-memory display surface.
#[derive(Debug, Default)]
pub struct StringDisplay {
    buffer: String,
    cursor: usize,
}

impl StringDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }
}

impl DisplaySurface for StringDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

/// Clear the surface and show the record: title, a blank line, then the
/// author names joined with `", "` and a trailing `", "`.
pub fn render_record(display: &mut dyn DisplaySurface, record: &Record) {
    display.clear();
    if let Some(title) = record.title() {
        display.insert(title);
    }
    display.insert("\n\n");
    let authors = record.authors();
    if !authors.is_empty() {
        display.insert(&authors.join(", "));
        display.insert(", ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsieve_bibtex::Document;

    #[test]
    fn test_render_record() {
        let doc = Document::new(
            "@article{k,\n  title = {A Study},\n  author = {John Smith and Jane Doe},\n}\n",
        );
        let record = doc.record_at(0).unwrap();
        let mut display = StringDisplay::new();
        render_record(&mut display, &record);
        assert_eq!(display.contents(), "A Study\n\nJohn Smith, Jane Doe, ");
    }

    #[test]
    fn test_render_record_without_authors() {
        let doc = Document::new("@misc{k,\n  title = {Untitled Memo},\n}\n");
        let record = doc.record_at(0).unwrap();
        let mut display = StringDisplay::new();
        render_record(&mut display, &record);
        assert_eq!(display.contents(), "Untitled Memo\n\n");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut display = StringDisplay::new();
        display.insert("stale");
        display.clear();
        display.insert("fresh");
        assert_eq!(display.contents(), "fresh");
    }
}
