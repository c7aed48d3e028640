//! HTTP retrieval for site fetchers
//!
//! Retrieval is synchronous and blocking: the review loop has one flow of
//! control and a fetch simply delays the next display update. The [`Fetch`]
//! trait is the seam tests mock.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Timeout")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("Parse error: {message}")]
    ParseError { message: String },
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Synchronous "fetch URL, return content" primitive.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        Self::with_timeout(user_agent, Duration::from_secs(30))
    }

    pub fn with_timeout(user_agent: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: user_agent.to_string(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new("imsieve/0.1")
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::RequestFailed {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(HttpError::RateLimited);
        }

        let body = response.text().map_err(|e| HttpError::ParseError {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}

/// Fetcher that refuses every request, for offline screening. Enrichment
/// is best-effort, so the review loop keeps working without a network.
pub struct NoFetch;

impl Fetch for NoFetch {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        Err(HttpError::RequestFailed {
            message: format!("fetching disabled: {url}"),
        })
    }
}
