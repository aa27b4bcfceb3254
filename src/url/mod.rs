//! URL acceptance rules for product pages
//!
//! A submitted URL is accepted when it mentions the marketplace domain and at
//! least one product-path marker. The check is a substring heuristic, not a
//! URL parse: no network access and no normalization happen here.

mod matcher;

use crate::config::ValidatorConfig;
use crate::ValidationError;

pub use matcher::contains_any;

/// Default marketplace domain fragment
pub const DEFAULT_DOMAIN_MARKER: &str = "amazon.";

/// Default product-path markers
pub const DEFAULT_PRODUCT_MARKERS: [&str; 2] = ["/dp/", "/gp/"];

/// Rule set deciding whether a URL may be submitted for scraping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRules {
    /// Fragment that marks the marketplace domain
    pub domain_marker: String,

    /// Path fragments, one of which must be present
    pub product_markers: Vec<String>,
}

impl Default for UrlRules {
    fn default() -> Self {
        Self {
            domain_marker: DEFAULT_DOMAIN_MARKER.to_string(),
            product_markers: DEFAULT_PRODUCT_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl From<&ValidatorConfig> for UrlRules {
    fn from(config: &ValidatorConfig) -> Self {
        Self {
            domain_marker: config.domain_marker.clone(),
            product_markers: config.product_markers.clone(),
        }
    }
}

impl UrlRules {
    /// Checks a URL against the rules, reporting the first rule it breaks
    ///
    /// Blank input is refused before the marker checks run.
    ///
    /// # Examples
    ///
    /// ```
    /// use prodscrape::url::UrlRules;
    /// use prodscrape::ValidationError;
    ///
    /// let rules = UrlRules::default();
    /// assert_eq!(rules.check("   "), Err(ValidationError::Blank));
    /// assert_eq!(
    ///     rules.check("https://www.amazon.in/"),
    ///     Err(ValidationError::MissingProductPath)
    /// );
    /// assert!(rules.check("https://www.amazon.in/widget/dp/B000123456").is_ok());
    /// ```
    pub fn check(&self, url: &str) -> Result<(), ValidationError> {
        if url.trim().is_empty() {
            return Err(ValidationError::Blank);
        }

        if !url.contains(self.domain_marker.as_str()) {
            return Err(ValidationError::MissingDomain(self.domain_marker.clone()));
        }

        if !contains_any(url, &self.product_markers) {
            return Err(ValidationError::MissingProductPath);
        }

        Ok(())
    }

    /// Returns true if the URL passes every rule
    pub fn is_acceptable(&self, url: &str) -> bool {
        self.check(url).is_ok()
    }
}

/// Checks a URL against the default marketplace rules
pub fn is_acceptable(url: &str) -> bool {
    UrlRules::default().is_acceptable(url)
}
