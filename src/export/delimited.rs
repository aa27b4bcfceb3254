//! Delimited-text encoding of a product record
//!
//! Output is exactly two lines, header and data, joined by `\n` with no
//! trailing newline. Every field is quoted and inner quotes are doubled;
//! nothing else is escaped, so newlines inside a field stay as they are.

use crate::export::{field_values, HEADERS};
use crate::product::ProductRecord;

/// Wraps a field in double quotes, doubling any quote inside it
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn join_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes a product record as a two-line, fully quoted CSV payload
///
/// # Examples
///
/// ```
/// use prodscrape::export::to_delimited_text;
/// use prodscrape::product::{Price, ProductRecord};
///
/// let record = ProductRecord {
///     name: "Widget".to_string(),
///     price: Price { original: "$10.00".to_string(), discounted: None },
///     description: String::new(),
///     variants: vec!["Red".to_string(), "Blue".to_string()],
///     image_urls: vec![],
/// };
///
/// let text = to_delimited_text(&record);
/// assert_eq!(text.lines().nth(1), Some(r#""Widget","$10.00","","","Red; Blue","""#));
/// ```
pub fn to_delimited_text(record: &ProductRecord) -> String {
    format!("{}\n{}", join_line(&HEADERS), join_line(&field_values(record)))
}
