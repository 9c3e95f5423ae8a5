//! SINIT grabber: fetch vendor ACM archives and unpack their payloads
//!
//! This crate scans a single web page for anchors pointing at SINIT zip
//! archives, downloads each archive, and extracts the `.bin` payloads it
//! contains into an output directory.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for grabber operations
#[derive(Debug, Error)]
pub enum GrabberError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Archive error: {0}")]
    Archive(#[from] archive::ArchiveError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching a page or an archive over HTTP
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Error ({status}): {url}")]
    Status { url: String, status: u16 },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for grabber operations
pub type Result<T> = std::result::Result<T, GrabberError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Link, LinkRules};
pub use pipeline::{run, RunSummary};
