//! Tests for the validation report and batch policy

use super::*;
use crate::Error;
use crate::app::services::record_validator::{ValidationReport, validate_rows};

#[test]
fn test_empty_report() {
    let report = ValidationReport::new();
    assert!(report.is_valid());
    assert_eq!(report.total_rows(), 0);
    assert_eq!(report.into_result(10).unwrap().len(), 0);
}

#[test]
fn test_valid_batch_into_result() {
    let report = validate_rows(&[valid_row(), valid_row()]);
    let records = report.into_result(10).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_any_failure_rejects_whole_batch() {
    let report = validate_rows(&batch_with_failures(5, &[3]));
    assert_eq!(report.records.len(), 4);

    match report.into_result(10) {
        Err(Error::Validation {
            failures,
            remaining,
        }) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].row_index, 3);
            assert_eq!(remaining, 0);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_error_quotes_first_ten_failures() {
    let bad: Vec<usize> = (1..=14).collect();
    let report = validate_rows(&batch_with_failures(20, &bad));

    // the full list stays available on the report
    assert_eq!(report.failures.len(), 14);

    let error = report.into_result(10).unwrap_err();
    assert_eq!(error.failure_count(), 14);
    let message = error.to_string();
    assert!(message.contains("Row 10: Missing product"));
    assert!(!message.contains("Row 11: Missing product"));
    assert!(message.ends_with("and 4 more errors"));
}

#[test]
fn test_report_merge_and_summary() {
    let mut first = validate_rows(&[valid_row()]);
    let second = validate_rows(&[row_with("price", "x")]);
    first.merge(second);

    assert_eq!(first.total_rows(), 2);
    assert_eq!(first.summary(), "2 rows: 1 valid, 1 failed");
}
