//! Configuration module for the SINIT grabber
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so a run without a config file behaves
//! exactly like one with an empty file.
//!
//! # Example
//!
//! ```no_run
//! use sinit_grabber::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("grabber.toml")).unwrap();
//! println!("Seed page: {}", config.crawler.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, DEFAULT_SEED_URL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
