//! Configuration module for prodscrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file means all defaults.
//!
//! # Example
//!
//! ```no_run
//! use prodscrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("prodscrape.toml")).unwrap();
//! println!("Scrape endpoint: {}", config.endpoint.scrape_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EndpointConfig, ExportConfig, UserAgentConfig, ValidatorConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::validate;
