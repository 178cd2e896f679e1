//! Sitescan: a single-site broken-link scanner
//!
//! This crate implements a same-domain web crawler that walks a site from a
//! seed URL and reports how many pages it scanned, which outbound links it
//! discovered, and which links (internal or external) are broken.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for sitescan operations
///
/// These errors can only surface outside the crawl loop (startup, report
/// writing). Failures inside the loop are recorded as broken links and never
/// abort the crawl.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
///
/// A `UrlError` on a discovered href means "skip this href", never a crawl
/// failure.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitescan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::crawl;
pub use output::CrawlReport;
pub use crate::url::{
    classify_scope, extract_domain, normalize_href, normalize_url, prepare_seed, Scope,
};
