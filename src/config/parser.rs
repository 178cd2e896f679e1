use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitescan::config::load_config;
///
/// let config = load_config(Path::new("sitescan.toml")).unwrap();
/// println!("workers: {}", config.crawler.max_concurrent_fetches);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    // Hosts are compared in normalized lowercase form
    for entry in &mut config.denylist {
        entry.domain = entry.domain.to_lowercase();
    }

    validate(&config)?;

    Ok(config)
}

/// Returns the built-in defaults, validated
///
/// Used when no config file is supplied on the command line.
pub fn default_config() -> Result<Config, ConfigError> {
    let config = Config::default();
    validate(&config)?;
    Ok(config)
}
