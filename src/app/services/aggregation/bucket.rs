//! Time bucket keys for trend queries

use crate::app::models::Granularity;
use chrono::{Datelike, NaiveDate};

/// Bucket key for a date at the given granularity
///
/// - `Day` → `YYYY-MM-DD`
/// - `Week` → `YYYY-Www`, using the ISO 8601 week-numbering year
/// - `Month` → `YYYY-MM`
///
/// Keys of one granularity sort chronologically as plain strings.
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Week => {
            let week = date.iso_week();
            format!("{:04}-W{:02}", week.year(), week.week())
        }
        Granularity::Month => format!("{:04}-{:02}", date.year(), date.month()),
    }
}
