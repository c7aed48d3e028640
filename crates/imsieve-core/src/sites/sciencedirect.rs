//! ScienceDirect (sciencedirect.com)
//!
//! The listing page links the article abstract (`/science/article/pii/...`)
//! and the PDF download (`pdfft` gateway).

use lazy_static::lazy_static;
use regex::Regex;

use super::{absolutize, get_ok, FetchError, LinkPair};
use crate::http::Fetch;

lazy_static! {
    static ref ABSTRACT_LINK: Regex =
        Regex::new(r#"href="([^"]*/science/article/pii/[^"]*)""#).unwrap();
    static ref FULL_TEXT_LINK: Regex = Regex::new(r#"href="([^"]*pdfft[^"]*)""#).unwrap();
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

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LISTING: &str = r#"
<a href="/science/article/pii/S0950584908001390">Abstract</a>
<a href="/science/article/pii/S0950584908001390/pdfft?isDTMRedir=true">PDF (312 K)</a>"#;

    #[test]
    fn test_scan_links() {
        let links = scan_links("http://www.sciencedirect.com/science/journal/09505849", SAMPLE_LISTING).unwrap();
        assert_eq!(
            links.abstract_url,
            "http://www.sciencedirect.com/science/article/pii/S0950584908001390"
        );
        assert!(links.full_text_url.contains("pdfft"));
    }

    #[test]
    fn test_scan_links_requires_both_patterns() {
        assert!(scan_links("http://www.sciencedirect.com/x", "<p>empty</p>").is_err());
    }
}
