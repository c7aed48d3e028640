//! Record data structures

use std::ops::Range;

use serde::Serialize;

/// Pseudo-field resolving to the cite key.
pub const KEY_FIELD: &str = "=key=";

/// A single field (name-value pair). Names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// A parsed bibliography record.
///
/// Records are views into the document text at the moment of parsing. The
/// `span` covers the full `@type{...}` region in document byte offsets and
/// is invalidated by any subsequent edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub key: String,
    pub entry_type: String,
    pub fields: Vec<Field>,
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Record {
    /// Get a field value by name (case-insensitive). The `=key=`
    /// pseudo-field resolves to the cite key. Absence is a valid outcome,
    /// not an error.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == KEY_FIELD {
            return Some(&self.key);
        }
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Present and not blank.
    pub fn has_nonempty(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// Author names, split on the BibTeX `and` separator.
    pub fn authors(&self) -> Vec<String> {
        self.get("author")
            .map(|value| {
                value
                    .split(" and ")
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
