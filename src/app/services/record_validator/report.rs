//! Validation report and batch acceptance policy

use crate::app::models::{SalesRecord, ValidationFailure};
use crate::{Error, Result};

/// Outcome of validating a batch of raw rows
///
/// Records and failures are both kept in row order. The full failure list is
/// always available here even though the aggregate error truncates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Rows that became canonical records
    pub records: Vec<SalesRecord>,
    /// Rows that failed, with 1-based row indexes
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every row validated
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of rows the report covers
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Append another report covering the rows that follow this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }

    /// All records if the batch is valid, else one error quoting the first `max_reported` failures
    pub fn into_result(self, max_reported: usize) -> Result<Vec<SalesRecord>> {
        if self.failures.is_empty() {
            Ok(self.records)
        } else {
            Err(Error::validation(self.failures, max_reported))
        }
    }

    /// Short description for logging
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} valid, {} failed",
            self.total_rows(),
            self.records.len(),
            self.failures.len()
        )
    }
}
