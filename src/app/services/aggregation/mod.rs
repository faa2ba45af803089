//! Aggregation engine for sales analytics queries
//!
//! Summaries, time-bucketed trends and per-dimension breakdowns all share one
//! filter-then-group routine. The engine holds no record state: callers pass
//! in a snapshot slice and get a freshly computed result back.
//!
//! # Architecture
//!
//! - [`engine`] - Query modes, the grouping routine and result shaping
//! - [`bucket`] - Day, ISO week and month bucket keys
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sales_analytics::{FilterCriteria, SalesRecord};
//! use sales_analytics::app::services::aggregation::AggregationEngine;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let records = vec![
//!     SalesRecord::new(day, "Laptop", "Electronics", "East", 4.0, 507.0, 2028.0).unwrap(),
//!     SalesRecord::new(day, "Smartphone", "Electronics", "North", 9.0, 228.0, 2052.0).unwrap(),
//! ];
//!
//! let summary = AggregationEngine::default()
//!     .summary(&records, &FilterCriteria::new())
//!     .unwrap();
//! assert_eq!(summary.total_revenue, 4080.0);
//! assert_eq!(summary.avg_order_value, 2040.0);
//! ```

pub mod bucket;
pub mod engine;

#[cfg(test)]
pub mod tests;

pub use bucket::bucket_key;
pub use engine::{AggregationEngine, AggregationMode, AggregationResult, Totals, group_by};
