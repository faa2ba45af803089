//! Sales Analytics Library
//!
//! A Rust library for importing tabular sales records from CSV files and
//! spreadsheet workbooks and answering analytical queries over them.
//!
//! This library provides tools for:
//! - Parsing CSV and workbook files into header-normalized raw rows
//! - Validating raw rows into canonical sales records with full error accumulation
//! - Filtering records by date range, product, category and region
//! - Aggregating summaries, time-bucketed trends and per-dimension breakdowns
//! - A snapshot-consistent in-memory store behind a store trait
//! - Comprehensive error handling with row-level detail

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregation;
        pub mod analytics;
        pub mod filter;
        pub mod record_validator;
        pub mod sales_store;
        pub mod tabular_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

use std::fmt::Write as _;

// Re-export commonly used types
pub use app::models::{
    DimensionStat, FilterCriteria, RawRow, SalesRecord, Summary, TrendPoint, ValidationFailure,
};
pub use app::services::analytics::AnalyticsService;
pub use app::services::sales_store::{InMemorySalesStore, SalesStore};
pub use config::SalesConfig;

/// Result type alias for the sales analytics library
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of failure surfaced by a sales store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The write conflicts with data already stored
    Conflict,
    /// The store could not serve the request
    Unavailable,
}

impl std::fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorKind::Conflict => write!(f, "conflict"),
            StoreErrorKind::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Comprehensive error types for sales ingestion and analytics
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// File format is neither CSV nor a recognized workbook format
    #[error("Unsupported file format: '{format}' (expected csv, xlsx, xls, xlsm, xlsb or ods)")]
    UnsupportedFormat { format: String },

    /// File is structurally malformed
    #[error("Failed to parse {format} file: {message}")]
    Parse {
        format: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// One or more rows failed validation and the batch was rejected
    #[error("Validation failed: {}", describe_failures(.failures, *.remaining))]
    Validation {
        /// Leading failures, in row order
        failures: Vec<ValidationFailure>,
        /// Number of failures not carried in `failures`
        remaining: usize,
    },

    /// Filter criteria or query parameters are malformed
    #[error("Invalid criteria: {message}")]
    InvalidCriteria { message: String },

    /// A record violates the canonical record invariants
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    /// Failure reported by the record store
    #[error("Store error ({kind}): {message}")]
    Store {
        kind: StoreErrorKind,
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

/// Render failures as `msg; msg; ... and N more errors`
fn describe_failures(failures: &[ValidationFailure], remaining: usize) -> String {
    let mut out = failures
        .iter()
        .map(|failure| failure.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    if remaining > 0 {
        let _ = write!(out, " and {} more errors", remaining);
    }
    out
}

impl Error {
    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a parse error without an underlying cause
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error wrapping the underlying cause
    pub fn parse_with_source(
        format: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            format: format.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error from the full failure list, keeping at most `max_reported`
    pub fn validation(mut failures: Vec<ValidationFailure>, max_reported: usize) -> Self {
        let remaining = failures.len().saturating_sub(max_reported);
        failures.truncate(max_reported);
        Self::Validation {
            failures,
            remaining,
        }
    }

    /// Create an invalid criteria error
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::InvalidCriteria {
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a store conflict error
    pub fn store_conflict(message: impl Into<String>) -> Self {
        Self::Store {
            kind: StoreErrorKind::Conflict,
            message: message.into(),
        }
    }

    /// Create a store unavailable error
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::Store {
            kind: StoreErrorKind::Unavailable,
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Total number of row failures behind a validation error
    pub fn failure_count(&self) -> usize {
        match self {
            Self::Validation {
                failures,
                remaining,
            } => failures.len() + remaining,
            _ => 0,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::parse_with_source("CSV", error)
    }
}

impl From<calamine::Error> for Error {
    fn from(error: calamine::Error) -> Self {
        Self::parse_with_source("workbook", error)
    }
}
