use crate::crawler::LinkRules;
use serde::Deserialize;

/// Page scanned for SINIT archive links when no seed is configured
pub const DEFAULT_SEED_URL: &str =
    "https://software.intel.com/content/www/us/en/develop/articles/intel-trusted-execution-technology.html";

/// Main configuration structure for the grabber
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Link discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Page scanned for archive links
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Links found at this depth or deeper are never followed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Case-insensitive marker every archive URL must contain
    #[serde(rename = "product-marker")]
    pub product_marker: String,

    /// Case-insensitive archive suffix every archive URL must contain
    #[serde(rename = "archive-suffix")]
    pub archive_suffix: String,

    /// Anchor attribute carrying the archive URL
    #[serde(rename = "url-attribute")]
    pub url_attribute: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving extracted payloads
    #[serde(rename = "output-folder")]
    pub output_folder: String,

    /// Keep downloaded archives under `<output-folder>/zip/`
    #[serde(rename = "keep-archives")]
    pub keep_archives: bool,

    /// Extension of archive entries that get extracted
    #[serde(rename = "payload-extension")]
    pub payload_extension: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        let rules = LinkRules::default();
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            max_depth: rules.max_depth,
            product_marker: rules.product_marker,
            archive_suffix: rules.archive_suffix,
            url_attribute: rules.url_attribute,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_folder: "./".to_string(),
            keep_archives: false,
            payload_extension: ".bin".to_string(),
        }
    }
}

impl Config {
    /// Builds the link classification rules from the crawler section
    pub fn link_rules(&self) -> LinkRules {
        LinkRules {
            max_depth: self.crawler.max_depth,
            product_marker: self.crawler.product_marker.clone(),
            archive_suffix: self.crawler.archive_suffix.clone(),
            url_attribute: self.crawler.url_attribute.clone(),
        }
    }
}
