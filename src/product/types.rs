//! Wire model of a scraped product
//!
//! Every field except `price.discounted` must be present in the service
//! response; empty strings and lists are accepted, missing keys are not.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Listed price of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Regular price, always present
    pub original: String,

    /// Alternative sale price, never a replacement for `original`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted: Option<String>,
}

/// Structured result of a product page scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "product_name")]
    pub name: String,

    pub price: Price,

    pub description: String,

    /// Variant labels in source order
    pub variants: Vec<String>,

    /// Absolute image URLs in source order
    pub image_urls: Vec<String>,
}

impl ProductRecord {
    /// Checks the structural invariants serde cannot express
    ///
    /// Returns a description of the first violation.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("product_name is empty".to_string());
        }

        if self.price.original.trim().is_empty() {
            return Err("price.original is empty".to_string());
        }

        Ok(())
    }

    /// Discounted price, or an empty string when there is none
    pub fn discounted_or_empty(&self) -> &str {
        self.price.discounted.as_deref().unwrap_or("")
    }

    /// Price as shown to the user: the sale price next to the original
    pub fn display_price(&self) -> String {
        match &self.price.discounted {
            Some(discounted) => format!("{} (was {})", discounted, self.price.original),
            None => self.price.original.clone(),
        }
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Price: {}", self.display_price())?;
        if !self.description.is_empty() {
            writeln!(f, "  Description: {}", self.description)?;
        }
        if !self.variants.is_empty() {
            writeln!(f, "  Variants: {}", self.variants.join(", "))?;
        }
        write!(f, "  Images: {}", self.image_urls.len())
    }
}
