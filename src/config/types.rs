use serde::Deserialize;

/// Main configuration structure for sitescan
///
/// Every field has a default, so running without a config file is the
/// common case; a TOML file overrides selectively.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub denylist: Vec<DomainEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Timeout for in-domain page fetches, in seconds
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for outbound-link liveness probes, in seconds (shorter than
    /// the page timeout: a probe only needs a status line)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Maximum number of concurrent liveness probes
    #[serde(rename = "max-concurrent-probes")]
    pub max_concurrent_probes: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

/// A denylisted domain entry
///
/// An entry matches any host that contains it as a substring.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    pub domain: String,
}

/// High-noise platforms whose outbound links drown out the useful ones
const DEFAULT_DENYLIST: &[&str] = &[
    "g.co",
    "facebook.com",
    "instagram.com",
    "x.com",
    "twitter.com",
    "pinterest.com",
    "shopify.com",
    "edpb.europa.eu",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
            denylist: DEFAULT_DENYLIST
                .iter()
                .map(|d| DomainEntry {
                    domain: d.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 10,
            page_timeout_secs: 10,
            probe_timeout_secs: 5,
            max_concurrent_probes: 10,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "sitescan".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}
