use crate::config::types::{Config, CrawlerConfig, DomainEntry, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_denylist(&config.denylist)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_probes must be between 1 and 100, got {}",
            config.max_concurrent_probes
        )));
    }

    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "page_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.probe_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "probe_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Ok(())
}

/// Validates denylist entries
fn validate_denylist(entries: &[DomainEntry]) -> Result<(), ConfigError> {
    for entry in entries {
        if entry.domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "denylist entries cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.crawler.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let mut config = Config::default();
        config.crawler.max_concurrent_fetches = 101;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.crawler.page_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_crawler_name_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_with_spaces_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "my scanner".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_denylist_entry_rejected() {
        let mut config = Config::default();
        config.denylist.push(DomainEntry {
            domain: "  ".to_string(),
        });
        assert!(validate(&config).is_err());
    }
}
