//! SpringerLink (springer.com)
//!
//! The listing page links the article landing page (`/article/10.…`) and
//! the `fulltext.pdf` download.

use lazy_static::lazy_static;
use regex::Regex;

use super::{absolutize, get_ok, FetchError, LinkPair};
use crate::http::Fetch;

lazy_static! {
    static ref ABSTRACT_LINK: Regex = Regex::new(r#"href="([^"]*/article/10\.[^"]*)""#).unwrap();
    static ref FULL_TEXT_LINK: Regex =
        Regex::new(r#"href="([^"]*fulltext\.pdf[^"]*)""#).unwrap();
}

pub(super) fn fetch_links(fetch: &dyn Fetch, url: &str) -> Result<LinkPair, FetchError> {
    let body = get_ok(fetch, url)?;
    scan_links(url, &body)
}

fn scan_links(base: &str, html: &str) -> Result<LinkPair, FetchError> {
    let abstract_link = ABSTRACT_LINK
        .captures(html)
        .ok_or(FetchError::PatternNotFound {
            what: "abstract link",
        })?;
    let full_text_link = FULL_TEXT_LINK
        .captures(html)
        .ok_or(FetchError::PatternNotFound {
            what: "full-text link",
        })?;
    Ok(LinkPair {
        abstract_url: absolutize(base, abstract_link.get(1).unwrap().as_str())?,
        full_text_url: absolutize(base, full_text_link.get(1).unwrap().as_str())?,
    })
}
