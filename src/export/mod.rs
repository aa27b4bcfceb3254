//! Export module for turning a product record into flat files
//!
//! This module handles:
//! - Encoding a record as fully quoted delimited text
//! - Encoding a record as a single-sheet XLSX workbook
//! - Handing the encoded bytes to a file sink
//!
//! Both encoders share one column order, so a delimited-text file imported
//! into a spreadsheet lines up with the workbook export.

mod delimited;
mod spreadsheet;
mod traits;

pub use delimited::to_delimited_text;
pub use spreadsheet::{to_spreadsheet, MAX_CELL_CHARS, SHEET_NAME};
pub use traits::{DirectorySink, ExportError, ExportResult, FileSink};

use crate::product::ProductRecord;

/// Default file name for the delimited-text export
pub const CSV_FILENAME: &str = "amazon-product.csv";

/// Default file name for the spreadsheet export
pub const XLSX_FILENAME: &str = "amazon-product.xlsx";

/// Column labels, in export order
pub const HEADERS: [&str; 6] = [
    "Product Name",
    "Original Price",
    "Discounted Price",
    "Description",
    "Variants",
    "Image URLs",
];

/// Separator between list entries inside one field
pub const LIST_SEPARATOR: &str = "; ";

/// Field values of a record, in the same order as `HEADERS`
pub fn field_values(record: &ProductRecord) -> [String; 6] {
    [
        record.name.clone(),
        record.price.original.clone(),
        record.discounted_or_empty().to_string(),
        record.description.clone(),
        record.variants.join(LIST_SEPARATOR),
        record.image_urls.join(LIST_SEPARATOR),
    ]
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    DelimitedText,
    Spreadsheet,
}

impl ExportFormat {
    /// Default file name for this format
    pub fn default_filename(&self) -> &'static str {
        match self {
            Self::DelimitedText => CSV_FILENAME,
            Self::Spreadsheet => XLSX_FILENAME,
        }
    }

    /// Encodes a record in this format
    pub fn encode(&self, record: &ProductRecord) -> ExportResult<Vec<u8>> {
        match self {
            Self::DelimitedText => Ok(to_delimited_text(record).into_bytes()),
            Self::Spreadsheet => to_spreadsheet(record),
        }
    }
}

/// Encodes the record and saves it through the sink
///
/// Without a record this is a silent no-op and returns `Ok(None)`; otherwise
/// it returns the number of bytes handed to the sink.
pub fn export_record(
    record: Option<&ProductRecord>,
    format: ExportFormat,
    filename: &str,
    sink: &dyn FileSink,
) -> ExportResult<Option<usize>> {
    let Some(record) = record else {
        tracing::debug!("Export to {} skipped: no product record", filename);
        return Ok(None);
    };

    let bytes = format.encode(record)?;
    sink.save(filename, &bytes)?;
    Ok(Some(bytes.len()))
}
