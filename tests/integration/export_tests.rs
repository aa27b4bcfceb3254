//! Integration tests for the export encoders and the directory sink

use calamine::{Reader, Xlsx};
use prodscrape::export::{
    export_record, to_delimited_text, to_spreadsheet, DirectorySink, ExportFormat, CSV_FILENAME,
    HEADERS, MAX_CELL_CHARS, SHEET_NAME, XLSX_FILENAME,
};
use prodscrape::product::{Price, ProductRecord};
use std::io::Cursor;
use tempfile::TempDir;

fn sample_record() -> ProductRecord {
    ProductRecord {
        name: "Ceramic Mug".to_string(),
        price: Price {
            original: "₹499".to_string(),
            discounted: Some("₹349".to_string()),
        },
        description: r#"Great "value" item"#.to_string(),
        variants: vec!["Red".to_string(), "Blue".to_string()],
        image_urls: vec![
            "https://m.media-amazon.com/images/I/a.jpg".to_string(),
            "https://m.media-amazon.com/images/I/b.jpg".to_string(),
        ],
    }
}

/// Reads every cell of the named sheet as text
fn read_sheet(bytes: Vec<u8>, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("Not a valid workbook");
    let range = workbook
        .worksheet_range(sheet)
        .expect("Sheet missing");

    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[test]
fn test_spreadsheet_layout() {
    let bytes = to_spreadsheet(&sample_record()).expect("Failed to build workbook");

    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.clone())).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    assert_eq!(SHEET_NAME, "Product Data");

    let rows = read_sheet(bytes, SHEET_NAME);
    assert_eq!(rows.len(), 2, "Expected one header row and one data row");
    assert!(rows.iter().all(|row| row.len() == 6));

    assert_eq!(rows[0], HEADERS.map(String::from).to_vec());
    assert_eq!(
        rows[1],
        vec![
            "Ceramic Mug",
            "₹499",
            "₹349",
            r#"Great "value" item"#,
            "Red; Blue",
            "https://m.media-amazon.com/images/I/a.jpg; https://m.media-amazon.com/images/I/b.jpg",
        ]
    );
}

#[test]
fn test_spreadsheet_absent_discount_is_empty() {
    let mut record = sample_record();
    record.price.discounted = None;

    let rows = read_sheet(to_spreadsheet(&record).unwrap(), SHEET_NAME);

    assert_eq!(rows[1][2], "");
    assert_eq!(rows[1][1], "₹499");
}

#[test]
fn test_spreadsheet_truncates_long_description() {
    let mut record = sample_record();
    record.description = "é".repeat(MAX_CELL_CHARS + 100);

    let rows = read_sheet(to_spreadsheet(&record).unwrap(), SHEET_NAME);

    assert_eq!(rows[1][3].chars().count(), MAX_CELL_CHARS);
    assert_eq!(rows[1][0], "Ceramic Mug");

    // Delimited text has no cell limit
    assert!(to_delimited_text(&record).contains(&record.description));
}

#[test]
fn test_delimited_text_matches_spreadsheet_values() {
    let record = sample_record();
    let text = to_delimited_text(&record);
    let (_, data) = text.split_once('\n').unwrap();

    assert_eq!(
        data,
        "\"Ceramic Mug\",\"₹499\",\"₹349\",\"Great \"\"value\"\" item\",\"Red; Blue\",\
         \"https://m.media-amazon.com/images/I/a.jpg; https://m.media-amazon.com/images/I/b.jpg\""
    );
}

#[test]
fn test_directory_sink_round_trip() {
    let dir = TempDir::new().unwrap();
    let sink = DirectorySink::new(dir.path());
    let record = sample_record();

    export_record(Some(&record), ExportFormat::DelimitedText, CSV_FILENAME, &sink).unwrap();
    export_record(Some(&record), ExportFormat::Spreadsheet, XLSX_FILENAME, &sink).unwrap();

    let csv = std::fs::read_to_string(dir.path().join("amazon-product.csv")).unwrap();
    assert_eq!(csv, to_delimited_text(&record));

    let xlsx = std::fs::read(dir.path().join("amazon-product.xlsx")).unwrap();
    let rows = read_sheet(xlsx, SHEET_NAME);
    assert_eq!(rows[1][0], "Ceramic Mug");
}

#[test]
fn test_export_without_record_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let sink = DirectorySink::new(dir.path());

    let written = export_record(None, ExportFormat::Spreadsheet, XLSX_FILENAME, &sink).unwrap();

    assert!(written.is_none());
    assert!(!dir.path().join(XLSX_FILENAME).exists());
}
