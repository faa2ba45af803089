//! Tabular file parser for uploaded sales files
//!
//! This module turns raw file bytes into an ordered sequence of [`RawRow`]s.
//! It only checks the structural well-formedness of the container; field
//! content is left to the record validator.
//!
//! ## Architecture
//!
//! - [`format`] - Format hint resolution (CSV vs spreadsheet workbook)
//! - [`csv_reader`] - Streaming, header-normalizing CSV row reader
//! - [`workbook_reader`] - Eager first-sheet workbook reader
//! - [`parser`] - Format dispatch and file reading
//!
//! ## Usage
//!
//! ```rust
//! use sales_analytics::app::services::tabular_parser::TabularFileParser;
//!
//! # fn example() -> sales_analytics::Result<()> {
//! let bytes = b"Date,Product,Category,Region,Quantity,Price,Revenue\n\
//!               2024-01-01,Laptop,Electronics,East,4,507,2028\n";
//! let rows = TabularFileParser::new().parse(bytes, "csv")?;
//! assert_eq!(rows[0].get("product"), Some("Laptop"));
//! # Ok(())
//! # }
//! ```
//!
//! [`RawRow`]: crate::app::models::RawRow

pub mod csv_reader;
pub mod format;
pub mod parser;
pub mod workbook_reader;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use csv_reader::CsvRowReader;
pub use format::FileFormat;
pub use parser::TabularFileParser;
pub use workbook_reader::{read_workbook, rows_from_range};
