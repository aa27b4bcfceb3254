//! Product record returned by the scrape service
//!
//! A record is an immutable value: the session replaces it wholesale on each
//! successful scrape and never edits it in place.

mod types;

pub use types::{Price, ProductRecord};
