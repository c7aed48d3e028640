//! Canonical field names of the review workflow
//!
//! Matching is case-insensitive like every field access; these literals are
//! the spellings written into the document.

pub const REVIEW: &str = "review";
pub const ABSTRACT: &str = "abstract";
pub const FULL_TEXT_URL: &str = "fullTextUrl";
pub const URL: &str = "url";
pub const TITLE: &str = "title";
pub const AUTHOR: &str = "author";

/// Pseudo-field resolving to the cite key.
pub const KEY: &str = "=key=";
