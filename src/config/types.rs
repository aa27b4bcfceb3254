//! Configuration sections and their defaults

use serde::Deserialize;

/// Main configuration structure for prodscrape
///
/// Every section is optional in the TOML file and falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub validator: ValidatorConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub export: ExportConfig,
}

/// Remote scrape service location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Scheme, host and port of the scrape service
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path the scrape request is posted to
    #[serde(rename = "scrape-path")]
    pub scrape_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            scrape_path: "/scrape".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Full URL of the scrape endpoint
    pub fn scrape_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.scrape_path
        )
    }
}

/// URL acceptance rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Fragment marking the marketplace domain
    #[serde(rename = "domain-marker")]
    pub domain_marker: String,

    /// Product-path fragments, at least one must occur
    #[serde(rename = "product-markers")]
    pub product_markers: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let rules = crate::url::UrlRules::default();
        Self {
            domain_marker: rules.domain_marker,
            product_markers: rules.product_markers,
        }
    }
}

/// User agent sent to the scrape service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Where exported files go
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the file sink writes into
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// File name for the delimited-text export
    #[serde(rename = "csv-filename")]
    pub csv_filename: String,

    /// File name for the spreadsheet export
    #[serde(rename = "xlsx-filename")]
    pub xlsx_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            csv_filename: crate::export::CSV_FILENAME.to_string(),
            xlsx_filename: crate::export::XLSX_FILENAME.to_string(),
        }
    }
}
