//! Sanity checks run on every loaded configuration

use crate::config::types::{Config, EndpointConfig, ExportConfig, UserAgentConfig, ValidatorConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint_config(&config.endpoint)?;
    validate_validator_config(&config.validator)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_export_config(&config.export)?;
    Ok(())
}

/// Validates the scrape endpoint location
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if !config.scrape_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "scrape-path must start with '/', got '{}'",
            config.scrape_path
        )));
    }

    Ok(())
}

/// Validates URL acceptance rules
fn validate_validator_config(config: &ValidatorConfig) -> Result<(), ConfigError> {
    if config.domain_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "domain-marker cannot be empty".to_string(),
        ));
    }

    if config.product_markers.is_empty() {
        return Err(ConfigError::Validation(
            "product-markers must list at least one marker".to_string(),
        ));
    }

    if config.product_markers.iter().any(|m| m.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "product-markers cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates export configuration
fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    for name in [&config.csv_filename, &config.xlsx_filename] {
        validate_filename(name)?;
    }

    Ok(())
}

/// Export file names are bare names, never paths
fn validate_filename(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "export file name cannot be empty".to_string(),
        ));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "export file name must not contain path separators, got '{}'",
            name
        )));
    }

    Ok(())
}
