use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_seed_url(&config.seed_url)?;

    // A limit of 0 would reject even the seed page's own links
    if config.max_depth < 1 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be >= 1, got {}",
            config.max_depth
        )));
    }

    for (field, value) in [
        ("product_marker", &config.product_marker),
        ("archive_suffix", &config.archive_suffix),
        ("url_attribute", &config.url_attribute),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_folder.is_empty() {
        return Err(ConfigError::Validation(
            "output_folder cannot be empty".to_string(),
        ));
    }

    if !config.payload_extension.starts_with('.') || config.payload_extension.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "payload_extension must look like \".bin\", got '{}'",
            config.payload_extension
        )));
    }

    Ok(())
}

/// Validates the seed URL: must parse and use http or https
pub fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use http or https",
            seed
        )));
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
    fn test_invalid_seed_url() {
        let mut config = Config::default();
        config.crawler.seed_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_seed_url_requires_http_scheme() {
        let mut config = Config::default();
        config.crawler.seed_url = "ftp://example.com/files".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let mut config = Config::default();
        config.crawler.product_marker = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_payload_extension_needs_dot() {
        let mut config = Config::default();
        config.output.payload_extension = "bin".to_string();
        assert!(validate(&config).is_err());

        config.output.payload_extension = ".".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_output_folder_rejected() {
        let mut config = Config::default();
        config.output.output_folder = String::new();
        assert!(validate(&config).is_err());
    }
}
