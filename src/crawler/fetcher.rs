//! HTTP transport adapter
//!
//! This module owns every HTTP request the scanner makes: building the
//! shared client, fetching in-domain pages, and issuing the short liveness
//! probes for outbound links. It also classifies transport failures so the
//! rest of the crawler never inspects a raw `reqwest::Error`.

use crate::config::UserAgentConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure classification
///
/// Every variant is handled identically at the crawl level (the target is
/// recorded as broken and the crawl continues); the distinction exists so
/// logs and tests can tell an expected network failure from a surprise.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("transport error: {0}")]
    Other(String),
}

impl FetchError {
    fn classify(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect
        } else {
            FetchError::Other(e.to_string())
        }
    }
}

/// Result of fetching an in-domain page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Any non-404 status; the body is handed to the link extractor
    Success {
        /// HTTP status code
        status: u16,
        /// Page body content
        body: String,
    },

    /// HTTP 404 - the page is a broken link
    NotFound,

    /// Transport failure - also a broken link
    Failed(FetchError),
}

/// Outcome of an outbound-link liveness probe
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Reachable and not a 404
    Live,

    /// 404 or transport failure
    Broken(FetchError),
}

/// Builds the HTTP client shared by page fetches and probes
///
/// Redirects are followed transparently by the client (reqwest's default
/// limited policy); the crawler sees only the final response. Per-request
/// timeouts are applied at call sites because page fetches and probes use
/// different budgets.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an in-domain page with the given timeout
///
/// Never returns an error: every failure mode is folded into the outcome so
/// a single unreachable page cannot abort the crawl.
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> FetchOutcome {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(r) => r,
        Err(e) => return FetchOutcome::Failed(FetchError::classify(e)),
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return FetchOutcome::NotFound;
    }

    // Reading the body can still time out or drop mid-stream
    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            status: status.as_u16(),
            body,
        },
        Err(e) => FetchOutcome::Failed(FetchError::classify(e)),
    }
}

/// Issues a single liveness probe against an outbound link
///
/// The body is discarded; only the status line matters. Uses the shorter
/// probe timeout and is never retried.
pub async fn probe_url(client: &Client, url: &str, timeout: Duration) -> ProbeOutcome {
    match client.get(url).timeout(timeout).send().await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => {
            ProbeOutcome::Broken(FetchError::Other("HTTP 404".to_string()))
        }
        Ok(_) => ProbeOutcome::Live,
        Err(e) => ProbeOutcome::Broken(FetchError::classify(e)),
    }
}
