//! Row and batch validation
//!
//! [`validate_row`] checks a single row; [`validate_rows`] folds a batch into a
//! [`ValidationReport`]; [`validate_rows_parallel`] splits a batch into
//! contiguous chunks validated on blocking workers and merges them back in
//! chunk order, so its output is identical to the sequential path.

use super::field_parsers::{get_required_field, parse_calendar_date, parse_non_negative};
use super::report::ValidationReport;
use crate::app::models::{RawRow, SalesRecord, ValidationFailure};
use crate::config::SalesConfig;
use crate::constants::fields;
use crate::{Error, Result};
use tokio::task;
use tracing::{debug, info};

/// Validate one row; `row_index` is the 1-based position used in messages
///
/// Presence of all seven fields is checked first, then the numeric fields,
/// then the date. Only the first problem in a row is reported.
pub fn validate_row(
    row: &RawRow,
    row_index: usize,
) -> std::result::Result<SalesRecord, ValidationFailure> {
    let mut values = [""; 7];
    for (slot, field) in values.iter_mut().zip(fields::REQUIRED) {
        *slot = get_required_field(row, field).ok_or_else(|| {
            ValidationFailure::new(row_index, format!("Row {}: Missing {}", row_index, field))
        })?;
    }
    let [date, product, category, region, quantity, price, revenue] = values;

    let numeric = |field: &str, raw: &str| {
        parse_non_negative(raw).ok_or_else(|| {
            ValidationFailure::new(
                row_index,
                format!("Row {}: Invalid {} ({})", row_index, field, raw),
            )
        })
    };
    let quantity = numeric(fields::QUANTITY, quantity)?;
    let price = numeric(fields::PRICE, price)?;
    let revenue = numeric(fields::REVENUE, revenue)?;

    let date = parse_calendar_date(date).ok_or_else(|| {
        ValidationFailure::new(
            row_index,
            format!("Row {}: Invalid date format ({})", row_index, date),
        )
    })?;

    SalesRecord::new(date, product, category, region, quantity, price, revenue)
        .map_err(|e| ValidationFailure::new(row_index, format!("Row {}: {}", row_index, e)))
}

/// Validate a batch whose first row has 1-based index `first_index`
fn validate_chunk(rows: &[RawRow], first_index: usize) -> ValidationReport {
    let mut report = ValidationReport::new();
    for (offset, row) in rows.iter().enumerate() {
        match validate_row(row, first_index + offset) {
            Ok(record) => report.records.push(record),
            Err(failure) => report.failures.push(failure),
        }
    }
    report
}

/// Validate every row of a batch, accumulating all failures in row order
pub fn validate_rows(rows: &[RawRow]) -> ValidationReport {
    validate_chunk(rows, 1)
}

/// Validate a batch across `workers` blocking tasks
///
/// Rows are split into contiguous chunks and the chunk reports are merged in
/// order, preserving row indexes and failure ordering.
pub async fn validate_rows_parallel(
    mut rows: Vec<RawRow>,
    workers: usize,
) -> Result<ValidationReport> {
    let workers = workers.max(1);
    let chunk_size = rows.len().div_ceil(workers).max(1);

    let mut handles = Vec::with_capacity(workers);
    let mut next_index = 1;
    while !rows.is_empty() {
        let rest = rows.split_off(chunk_size.min(rows.len()));
        let chunk = std::mem::replace(&mut rows, rest);
        let first_index = next_index;
        next_index += chunk.len();
        handles.push(task::spawn_blocking(move || {
            validate_chunk(&chunk, first_index)
        }));
    }

    debug!("Validating {} rows across {} chunks", next_index - 1, handles.len());

    let chunk_reports = futures::future::try_join_all(handles)
        .await
        .map_err(|e| Error::processing_interrupted(format!("Validation worker failed: {}", e)))?;

    let mut report = ValidationReport::new();
    for chunk_report in chunk_reports {
        report.merge(chunk_report);
    }
    Ok(report)
}

/// Batch validator applying the configured fan-out and error-reporting policy
#[derive(Debug, Clone)]
pub struct RecordValidator {
    max_reported_failures: usize,
    workers: usize,
    parallel_threshold: usize,
}

impl RecordValidator {
    /// Create a validator from configuration
    pub fn new(config: &SalesConfig) -> Self {
        Self {
            max_reported_failures: config.max_reported_failures,
            workers: config.validation_workers,
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Validate a batch, fanning out when it reaches the parallel threshold
    pub async fn validate(&self, rows: Vec<RawRow>) -> Result<ValidationReport> {
        let report = if self.workers > 1 && rows.len() >= self.parallel_threshold {
            validate_rows_parallel(rows, self.workers).await?
        } else {
            validate_rows(&rows)
        };

        info!("Validation complete: {}", report.summary());
        Ok(report)
    }

    /// Validate a batch and apply the all-or-nothing policy
    pub async fn validate_batch(&self, rows: Vec<RawRow>) -> Result<Vec<SalesRecord>> {
        self.validate(rows)
            .await?
            .into_result(self.max_reported_failures)
    }

    /// Number of failures quoted in an aggregate validation error
    pub fn max_reported_failures(&self) -> usize {
        self.max_reported_failures
    }
}
