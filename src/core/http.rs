// src/core/http.rs

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Browser-like User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Timeout for signature checks and single-page fetches.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for hidden-directory and exposed-file probes.
pub const PATH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for direct API path probes.
pub const API_PROBE_TIMEOUT: Duration = Duration::from_secs(8);
/// Timeout for the homepage fetch that seeds API discovery.
pub const API_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A fetched response, fully buffered.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Returns a header as text, or `None` when absent or not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Builds the single client shared by every probe of a run.
pub fn build_client() -> Result<Client, ProbeError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(ProbeError::Client)
}

/// Issues one GET and buffers the body.
pub async fn fetch(client: &Client, url: &str, timeout: Duration) -> Result<Page, ProbeError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|source| ProbeError::Request { url: url.to_string(), source })?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(|source| ProbeError::Body { url: url.to_string(), source })?;

    debug!(url, status = %status, bytes = body.len(), "Fetched page.");
    Ok(Page { status, headers, body })
}
