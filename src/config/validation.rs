use crate::config::types::Config;
use crate::ConfigError;

/// Validates semantic constraints the TOML schema cannot express
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "crawler.fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.crawler.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler.user-agent must not be empty".to_string(),
        ));
    }

    if config.index.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "index.database-path must not be empty".to_string(),
        ));
    }

    if !(1..=3).contains(&config.spelling.max_edit_distance) {
        return Err(ConfigError::Validation(format!(
            "spelling.max-edit-distance must be between 1 and 3, got {}",
            config.spelling.max_edit_distance
        )));
    }

    if config.spelling.min_term_length == 0 {
        return Err(ConfigError::Validation(
            "spelling.min-term-length must be at least 1".to_string(),
        ));
    }

    Ok(())
}
