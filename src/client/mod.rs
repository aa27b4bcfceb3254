//! Client for the remote scrape service
//!
//! The scraper itself (page fetching, HTML parsing) lives behind an HTTP
//! endpoint. This module issues exactly one request per scrape and reduces
//! every failure to a `RequestError`.

mod scraper;

pub use scraper::{build_http_client, HttpScrapeClient, ScrapeClient};
