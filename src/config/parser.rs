use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sinit_grabber::config::load_config;
///
/// let config = load_config(Path::new("grabber.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEED_URL;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
seed-url = "https://example.com/downloads.html"
max-depth = 2
product-marker = "acm"

[output]
output-folder = "./firmware"
keep-archives = true
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.seed_url, "https://example.com/downloads.html");
        assert_eq!(config.crawler.max_depth, 2);
        assert_eq!(config.crawler.product_marker, "acm");
        assert_eq!(config.crawler.archive_suffix, ".zip");
        assert_eq!(config.output.output_folder, "./firmware");
        assert!(config.output.keep_archives);
        assert_eq!(config.output.payload_extension, ".bin");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.seed_url, DEFAULT_SEED_URL);
        assert_eq!(config.crawler.max_depth, 1);
        assert_eq!(config.crawler.url_attribute, "data-id-url");
        assert_eq!(config.output.output_folder, "./");
        assert!(!config.output.keep_archives);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/grabber.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
max-depth = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_link_rules_follow_crawler_section() {
        let config = parse_config(
            r#"
[crawler]
max-depth = 3
archive-suffix = ".ZIP"
"#,
        )
        .unwrap();

        let rules = config.link_rules();
        assert_eq!(rules.max_depth, 3);
        assert_eq!(rules.archive_suffix, ".ZIP");
        assert_eq!(rules.product_marker, "sinit");
    }
}
