//! Tests for row and batch validation

use super::*;
use crate::app::models::RawRow;
use crate::app::services::record_validator::{
    RecordValidator, validate_row, validate_rows, validate_rows_parallel,
};
use crate::config::SalesConfig;
use crate::constants::fields;
use chrono::NaiveDate;

#[test]
fn test_validate_valid_row() {
    let record = validate_row(&valid_row(), 1).unwrap();

    assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(record.product(), "Laptop");
    assert_eq!(record.category(), "Electronics");
    assert_eq!(record.region(), "East");
    assert_eq!(record.quantity(), 4.0);
    assert_eq!(record.price(), 507.0);
    assert_eq!(record.revenue(), 2028.0);
}

#[test]
fn test_missing_field_names_field_and_row() {
    for field in fields::REQUIRED {
        let failure = validate_row(&row_without(field), 7).unwrap_err();
        assert_eq!(failure.row_index, 7);
        assert_eq!(failure.message, format!("Row 7: Missing {}", field));
    }
}

#[test]
fn test_empty_or_whitespace_field_is_missing() {
    let failure = validate_row(&row_with("region", "   "), 2).unwrap_err();
    assert_eq!(failure.message, "Row 2: Missing region");

    let failure = validate_row(&row_with("quantity", ""), 3).unwrap_err();
    assert_eq!(failure.message, "Row 3: Missing quantity");
}

#[test]
fn test_invalid_numeric_fields() {
    let cases = [
        ("quantity", "abc", "Row 1: Invalid quantity (abc)"),
        ("quantity", "-4", "Row 1: Invalid quantity (-4)"),
        ("price", "12abc", "Row 1: Invalid price (12abc)"),
        ("price", "-0.5", "Row 1: Invalid price (-0.5)"),
        ("revenue", "NaN", "Row 1: Invalid revenue (NaN)"),
        ("revenue", "-2028", "Row 1: Invalid revenue (-2028)"),
    ];

    for (field, value, expected) in cases {
        let failure = validate_row(&row_with(field, value), 1).unwrap_err();
        assert_eq!(failure.message, expected);
    }
}

#[test]
fn test_invalid_date() {
    let failure = validate_row(&row_with("date", "31/31/2024"), 4).unwrap_err();
    assert_eq!(failure.row_index, 4);
    assert_eq!(failure.message, "Row 4: Invalid date format (31/31/2024)");
}

#[test]
fn test_first_failure_in_row_is_reported() {
    let row = RawRow::from_pairs([
        ("date", "garbage"),
        ("product", "Laptop"),
        ("category", "Electronics"),
        ("region", "East"),
        ("quantity", "-1"),
        ("price", "507"),
        ("revenue", ""),
    ]);
    let failure = validate_row(&row, 1).unwrap_err();
    assert_eq!(failure.message, "Row 1: Missing revenue");
}

#[test]
fn test_text_fields_are_trimmed() {
    let record = validate_row(&row_with("product", "  Laptop Pro  "), 1).unwrap();
    assert_eq!(record.product(), "Laptop Pro");
}

#[test]
fn test_extra_columns_are_ignored() {
    let mut row = valid_row();
    row.insert("notes", "gift wrapped");
    assert!(validate_row(&row, 1).is_ok());
}

#[test]
fn test_batch_accumulates_failures_in_row_order() {
    let rows = batch_with_failures(8, &[2, 5, 8]);
    let report = validate_rows(&rows);

    assert_eq!(report.records.len(), 5);
    let indexes: Vec<usize> = report.failures.iter().map(|f| f.row_index).collect();
    assert_eq!(indexes, vec![2, 5, 8]);

    // sibling rows are unaffected
    let products: Vec<&str> = report.records.iter().map(|r| r.product()).collect();
    assert_eq!(
        products,
        vec!["Product 1", "Product 3", "Product 4", "Product 6", "Product 7"]
    );
}

#[test]
fn test_empty_batch() {
    let report = validate_rows(&[]);
    assert!(report.is_valid());
    assert_eq!(report.total_rows(), 0);
}

#[tokio::test]
async fn test_parallel_matches_sequential() {
    let rows = batch_with_failures(103, &[1, 17, 50, 51, 99, 103]);
    let sequential = validate_rows(&rows);

    for workers in [1, 2, 3, 4, 8, 200] {
        let parallel = validate_rows_parallel(rows.clone(), workers).await.unwrap();
        assert_eq!(parallel, sequential, "workers = {}", workers);
    }
}

#[tokio::test]
async fn test_parallel_empty_batch() {
    let report = validate_rows_parallel(Vec::new(), 4).await.unwrap();
    assert_eq!(report.total_rows(), 0);
}

#[tokio::test]
async fn test_record_validator_uses_parallel_path_above_threshold() {
    let config = SalesConfig::default()
        .with_validation_workers(4)
        .with_parallel_threshold(10);
    let validator = RecordValidator::new(&config);

    let rows = batch_with_failures(40, &[12, 33]);
    let report = validator.validate(rows.clone()).await.unwrap();
    assert_eq!(report, validate_rows(&rows));
}

#[tokio::test]
async fn test_record_validator_batch_policy() {
    let config = SalesConfig::default().with_max_reported_failures(2);
    let validator = RecordValidator::new(&config);
    assert_eq!(validator.max_reported_failures(), 2);

    let records = validator.validate_batch(batch_with_failures(3, &[])).await.unwrap();
    assert_eq!(records.len(), 3);

    let error = validator
        .validate_batch(batch_with_failures(6, &[1, 2, 3, 4]))
        .await
        .unwrap_err();
    assert_eq!(error.failure_count(), 4);
    assert!(error.to_string().ends_with("and 2 more errors"));
}
