//! Spreadsheet encoding of a product record
//!
//! Produces an XLSX workbook with a single "Product Data" sheet: a header
//! row followed by exactly one data row.

use crate::export::traits::ExportResult;
use crate::export::{field_values, HEADERS};
use crate::product::ProductRecord;
use rust_xlsxwriter::{Format, Workbook};

/// Name of the only worksheet
pub const SHEET_NAME: &str = "Product Data";

/// Longest text Excel accepts in one cell, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Cuts a value down to the cell limit on a character boundary
fn fit_cell<'a>(column: &str, value: &'a str) -> &'a str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            tracing::warn!(
                "{} truncated to {} characters for the spreadsheet export",
                column,
                MAX_CELL_CHARS
            );
            &value[..end]
        }
        None => value,
    }
}

/// Encodes a product record as an XLSX workbook
///
/// Values longer than `MAX_CELL_CHARS` are truncated so the workbook can
/// always be built.
///
/// # Arguments
///
/// * `record` - The product record to encode
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The workbook file contents
/// * `Err(ExportError)` - The workbook could not be assembled
pub fn to_spreadsheet(record: &ProductRecord) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (col, value) in field_values(record).iter().enumerate() {
        worksheet.write_string(1, col as u16, fit_cell(HEADERS[col], value))?;
    }

    Ok(workbook.save_to_buffer()?)
}
