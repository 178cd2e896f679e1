//! Configuration loading and validation
//!
//! Sitescan runs with built-in defaults; a TOML file selectively overrides
//! them (worker counts, timeouts, the outbound-link denylist).

mod parser;
mod types;
mod validation;

pub use parser::{default_config, load_config};
pub use types::{Config, CrawlerConfig, DomainEntry, UserAgentConfig};
pub use validation::validate;
