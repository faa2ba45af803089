//! Comprehensive tests for the record validator
//!
//! Shared fixtures build raw rows with all seven fields, optionally overriding
//! or dropping individual fields.

pub mod report_tests;
pub mod validator_tests;

use crate::app::models::RawRow;

/// Field values for a valid row
pub const VALID_FIELDS: [(&str, &str); 7] = [
    ("date", "2024-01-01"),
    ("product", "Laptop"),
    ("category", "Electronics"),
    ("region", "East"),
    ("quantity", "4"),
    ("price", "507"),
    ("revenue", "2028"),
];

/// Create a valid raw row
pub fn valid_row() -> RawRow {
    RawRow::from_pairs(VALID_FIELDS)
}

/// Create a valid row with one field replaced
pub fn row_with(field: &str, value: &str) -> RawRow {
    RawRow::from_pairs(
        VALID_FIELDS
            .iter()
            .map(|(k, v)| (*k, if *k == field { value } else { *v })),
    )
}

/// Create a valid row with one field removed entirely
pub fn row_without(field: &str) -> RawRow {
    RawRow::from_pairs(VALID_FIELDS.iter().filter(|(k, _)| *k != field).copied())
}

/// Create `count` rows where every row whose 1-based index is in `bad` lacks a product
pub fn batch_with_failures(count: usize, bad: &[usize]) -> Vec<RawRow> {
    (1..=count)
        .map(|index| {
            if bad.contains(&index) {
                row_with("product", "")
            } else {
                row_with("product", &format!("Product {}", index))
            }
        })
        .collect()
}
