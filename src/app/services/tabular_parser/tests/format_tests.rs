//! Tests for format hint resolution

use crate::Error;
use crate::app::services::tabular_parser::{FileFormat, TabularFileParser};
use std::path::Path;

#[test]
fn test_format_from_hint() {
    assert_eq!(FileFormat::from_hint("csv").unwrap(), FileFormat::Csv);
    assert_eq!(FileFormat::from_hint(".CSV").unwrap(), FileFormat::Csv);
    assert_eq!(FileFormat::from_hint("xlsx").unwrap(), FileFormat::Workbook);
    assert_eq!(FileFormat::from_hint(".xls").unwrap(), FileFormat::Workbook);
    assert_eq!(FileFormat::from_hint("ODS").unwrap(), FileFormat::Workbook);
}

#[test]
fn test_format_from_hint_unsupported() {
    for hint in ["txt", "json", "", "."] {
        assert!(
            matches!(
                FileFormat::from_hint(hint),
                Err(Error::UnsupportedFormat { .. })
            ),
            "hint {:?} should be unsupported",
            hint
        );
    }
}

#[test]
fn test_format_from_path() {
    assert_eq!(
        FileFormat::from_path(Path::new("/tmp/sales-2024.CSV")).unwrap(),
        FileFormat::Csv
    );
    assert_eq!(
        FileFormat::from_path(Path::new("report.xlsx")).unwrap(),
        FileFormat::Workbook
    );
    assert!(FileFormat::from_path(Path::new("README")).is_err());
}

#[test]
fn test_parse_rejects_unsupported_hint_before_reading() {
    let result = TabularFileParser::new().parse(b"anything", "pdf");
    match result {
        Err(Error::UnsupportedFormat { format }) => assert_eq!(format, "pdf"),
        other => panic!("expected unsupported format, got {:?}", other),
    }
}

#[test]
fn test_parse_path_detects_format_from_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Sales.CSV");
    std::fs::write(&path, super::csv_content(super::MIXED_CASE_HEADER, super::TWO_DATA_ROWS)).unwrap();

    let rows = TabularFileParser::new().parse_path(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("product"), Some("Smartphone"));

    let missing = dir.path().join("missing.csv");
    assert!(matches!(
        TabularFileParser::new().parse_path(&missing),
        Err(Error::Io { .. })
    ));
}
