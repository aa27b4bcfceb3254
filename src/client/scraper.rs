//! HTTP scrape client
//!
//! This module talks to the remote scrape service:
//! - Building the HTTP client with the configured user agent
//! - Posting the product URL to the scrape endpoint
//! - Mapping transport errors, HTTP status and payload shape to one outcome

use crate::config::{Config, UserAgentConfig};
use crate::product::ProductRecord;
use crate::RequestError;
use reqwest::Client;
use serde::Serialize;

/// Body posted to the scrape endpoint
#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

/// Source of product records
///
/// One call is one scrape: implementations must not retry or cache.
#[async_trait::async_trait]
pub trait ScrapeClient: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ProductRecord, RequestError>;
}

/// Builds an HTTP client with the configured user agent
///
/// Timeouts are left at the transport defaults.
///
/// # Example
///
/// ```no_run
/// use prodscrape::client::build_http_client;
/// use prodscrape::config::UserAgentConfig;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: Name/Version
    let user_agent = format!("{}/{}", config.name, config.version);

    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Scrape client backed by the remote HTTP service
#[derive(Debug, Clone)]
pub struct HttpScrapeClient {
    client: Client,
    endpoint: String,
}

impl HttpScrapeClient {
    /// Creates a client for the endpoint named in the configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self::with_client(client, config.endpoint.scrape_url()))
    }

    /// Creates a client from an existing reqwest client and endpoint URL
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ScrapeClient for HttpScrapeClient {
    /// Posts `{ "url": url }` and decodes the product record
    ///
    /// # Failure Mapping
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Connection, TLS, timeout | `RequestError::Transport` |
    /// | Non-2xx status | `RequestError::Status` |
    /// | Body not a product record | `RequestError::Malformed` |
    /// | Empty name or original price | `RequestError::Malformed` |
    async fn scrape(&self, url: &str) -> Result<ProductRecord, RequestError> {
        tracing::debug!("POST {} for {}", self.endpoint, url);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let record: ProductRecord = serde_json::from_slice(&body)
            .map_err(|e| RequestError::Malformed(e.to_string()))?;
        record.check_shape().map_err(RequestError::Malformed)?;

        tracing::debug!(
            "Scraped '{}' ({} variants, {} images)",
            record.name,
            record.variants.len(),
            record.image_urls.len()
        );

        Ok(record)
    }
}
