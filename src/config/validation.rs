use crate::config::types::{
    BrowserConfig, CommentConfig, Config, OutputConfig, PacingConfig, SiteConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_browser_config(&config.browser)?;
    validate_comment_config(&config.comments)?;
    validate_pacing_config(&config.pacing)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    // Discussion links are joined with a '/' separator
    if config.base_url.ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must not end with '/'",
            config.base_url
        )));
    }

    if config.limit < 1 {
        return Err(ConfigError::Validation(format!(
            "limit must be >= 1, got {}",
            config.limit
        )));
    }

    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "timeout must be >= 1ms".to_string(),
        ));
    }

    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.page_load_timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "page_load_timeout must be >= 1ms".to_string(),
        ));
    }

    Ok(())
}

/// Validates comment fetching configuration
fn validate_comment_config(config: &CommentConfig) -> Result<(), ConfigError> {
    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "retries must be >= 1, got {}",
            config.retries
        )));
    }

    if !config.backoff_factor.is_finite() || config.backoff_factor <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "backoff_factor must be a positive number, got {}",
            config.backoff_factor
        )));
    }

    Ok(())
}

/// Validates pacing bounds
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("min_delay", config.min_delay),
        ("max_delay", config.max_delay),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{} must be a non-negative number of seconds, got {}",
                name, value
            )));
        }
    }

    if config.min_delay > config.max_delay {
        return Err(ConfigError::Validation(format!(
            "min_delay ({}s) cannot exceed max_delay ({}s)",
            config.min_delay, config.max_delay
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
