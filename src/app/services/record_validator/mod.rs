//! Record validation for parsed sales rows
//!
//! This module turns [`RawRow`]s into canonical [`SalesRecord`]s. Validation is
//! a pure function: every row is visited, failures are collected as data in
//! row order, and one row's outcome never affects another's.
//!
//! # Architecture
//!
//! - [`field_parsers`] - Required-field lookup, decimal and calendar-date parsing
//! - [`validator`] - Per-row validation, batch validation and parallel fan-out
//! - [`report`] - Validation report and the all-or-nothing batch policy
//!
//! # Batch Policy
//!
//! A batch with any failure is rejected as a whole. [`ValidationReport::into_result`]
//! converts a report into either all records or a single
//! [`Error::Validation`](crate::Error::Validation) quoting the first failures.
//!
//! # Example Usage
//!
//! ```rust
//! use sales_analytics::RawRow;
//! use sales_analytics::app::services::record_validator::validate_rows;
//!
//! let rows = vec![RawRow::from_pairs([
//!     ("date", "2024-01-01"),
//!     ("product", "Laptop"),
//!     ("category", "Electronics"),
//!     ("region", "East"),
//!     ("quantity", "4"),
//!     ("price", "507"),
//!     ("revenue", "2028"),
//! ])];
//!
//! let report = validate_rows(&rows);
//! assert!(report.is_valid());
//! assert_eq!(report.records[0].revenue(), 2028.0);
//! ```
//!
//! [`RawRow`]: crate::app::models::RawRow
//! [`SalesRecord`]: crate::app::models::SalesRecord

pub mod field_parsers;
pub mod report;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_parsers::{parse_calendar_date, parse_decimal};
pub use report::ValidationReport;
pub use validator::{RecordValidator, validate_row, validate_rows, validate_rows_parallel};
