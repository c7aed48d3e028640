//! Per-site metadata fetchers
//!
//! Dispatch is a static table from registrable domain to a pair of plain
//! function pointers; the fetcher set is closed, so there is no trait
//! object per site. Adding a site means adding one table row.
//!
//! Each site performs the same two-step fetch: the listing page yields the
//! abstract-page link and the full-text link (matched by known layout
//! patterns, not a real HTML parser), then the abstract page yields the
//! abstract text. Either pattern missing aborts the whole fetch; partial
//! link pairs are never returned.

mod acm;
mod sciencedirect;
mod springer;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::http::{Fetch, HttpError};

/// The two links a listing page yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPair {
    pub abstract_url: String,
    pub full_text_url: String,
}

pub type LinksFn = fn(&dyn Fetch, &str) -> Result<LinkPair, FetchError>;
pub type AbstractFn = fn(&dyn Fetch, &str) -> Result<String, FetchError>;

/// One registry row: a domain suffix and its fetcher pair. Read-only,
/// initialized at process start.
pub struct SiteEntry {
    pub domain: &'static str,
    pub fetch_links: LinksFn,
    pub fetch_abstract: AbstractFn,
}

pub static SITES: &[SiteEntry] = &[
    SiteEntry {
        domain: "acm.org",
        fetch_links: acm::fetch_links,
        fetch_abstract: fetch_first_paragraph,
    },
    SiteEntry {
        domain: "sciencedirect.com",
        fetch_links: sciencedirect::fetch_links,
        fetch_abstract: fetch_first_paragraph,
    },
    SiteEntry {
        domain: "springer.com",
        fetch_links: springer::fetch_links,
        fetch_abstract: fetch_first_paragraph,
    },
];

pub fn lookup(domain: &str) -> Option<&'static SiteEntry> {
    SITES.iter().find(|site| site.domain == domain)
}

/// URL with no extractable host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no registrable domain in {url}")]
pub struct MalformedUrl {
    pub url: String,
}

/// Last two dot-separated labels of the URL's host, the fetcher dispatch
/// key. Single-label hosts pass through unchanged.
pub fn registrable_domain(url: &str) -> Result<String, MalformedUrl> {
    let malformed = || MalformedUrl {
        url: url.to_string(),
    };
    let parsed = Url::parse(url).map_err(|_| malformed())?;
    let host = parsed.host_str().ok_or_else(malformed)?;
    let labels: Vec<&str> = host.split('.').filter(|label| !label.is_empty()).collect();
    if labels.is_empty() {
        return Err(malformed());
    }
    let tail = &labels[labels.len().saturating_sub(2)..];
    Ok(tail.join("."))
}

/// Fetch failures: transport errors and expected-pattern misses alike.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("page layout changed: {what} not found")]
    PatternNotFound { what: &'static str },

    #[error("no abstract paragraph on page")]
    NoAbstract,

    #[error("cannot resolve link: {url}")]
    BadLink { url: String },
}

lazy_static! {
    static ref FIRST_PARAGRAPH: Regex = Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Retrieve `url`, take the first `<p>...</p>` block, strip the tag
/// markup, and return plain text. Same extraction for every registered
/// site.
pub fn fetch_first_paragraph(fetch: &dyn Fetch, url: &str) -> Result<String, FetchError> {
    let body = get_ok(fetch, url)?;
    first_paragraph_text(&body).ok_or(FetchError::NoAbstract)
}

pub(crate) fn get_ok(fetch: &dyn Fetch, url: &str) -> Result<String, FetchError> {
    let response = fetch.get(url)?;
    if response.status != 200 {
        return Err(FetchError::Status {
            status: response.status,
        });
    }
    Ok(response.body)
}

pub(crate) fn first_paragraph_text(html: &str) -> Option<String> {
    let captures = FIRST_PARAGRAPH.captures(html)?;
    let inner = captures.get(1).unwrap().as_str();
    let stripped = TAG.replace_all(inner, " ");
    let decoded = decode_entities(&stripped);
    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Rewrite a scanned link into an absolute URL against the page it came
/// from.
pub(crate) fn absolutize(base: &str, link: &str) -> Result<String, FetchError> {
    let base = Url::parse(base).map_err(|_| FetchError::BadLink {
        url: base.to_string(),
    })?;
    let joined = base.join(link).map_err(|_| FetchError::BadLink {
        url: link.to_string(),
    })?;
    Ok(joined.to_string())
}
