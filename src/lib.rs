//! prodscrape: product page scrape orchestration and export
//!
//! This crate submits a product page URL to a remote scrape service, tracks the
//! single in-flight request through an explicit session state machine, and
//! encodes the returned product record as delimited text or as a spreadsheet.

pub mod client;
pub mod config;
pub mod export;
pub mod product;
pub mod session;
pub mod url;

use thiserror::Error;

/// Main error type for prodscrape operations
#[derive(Debug, Error)]
pub enum ProdError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rejected URL: {0}")]
    Validation(#[from] ValidationError),

    #[error("Scrape request failed: {0}")]
    Request(#[from] RequestError),

    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

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

/// Reasons a submitted URL is refused before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a product URL")]
    Blank,

    #[error("URL is not on the supported marketplace (expected '{0}')")]
    MissingDomain(String),

    #[error("URL does not point to a product page")]
    MissingProductPath,
}

/// Failure of the remote scrape call
///
/// Callers only distinguish success from failure; the variants exist for logs.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("malformed product payload: {0}")]
    Malformed(String),
}

/// Result type alias for prodscrape operations
pub type Result<T> = std::result::Result<T, ProdError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{HttpScrapeClient, ScrapeClient};
pub use config::Config;
pub use export::{to_delimited_text, to_spreadsheet, DirectorySink, FileSink};
pub use product::{Price, ProductRecord};
pub use session::{Notification, Notifier, ScrapeSession, SessionHandle, SessionStatus};
pub use crate::url::{is_acceptable, UrlRules};
