//! Field parsing utilities for raw sales rows
//!
//! Helpers for pulling required values out of a [`RawRow`] and parsing the
//! numeric and date fields with the accepted text representations.

use crate::app::models::RawRow;
use crate::constants::{DATE_FORMATS, DATETIME_FORMATS};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Plain decimal text: optional sign, digits with optional fraction, optional exponent
static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
        .expect("decimal pattern is a valid regex")
});

/// Get a required, non-empty (after trimming) field value
pub fn get_required_field<'a>(row: &'a RawRow, field_name: &str) -> Option<&'a str> {
    row.get(field_name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse plain decimal text into a finite number
///
/// `NaN`, `inf`, hex literals and thousands separators are rejected.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if !DECIMAL_PATTERN.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a non-negative decimal; negative values are rejected
pub fn parse_non_negative(text: &str) -> Option<f64> {
    // adding 0.0 turns -0.0 into 0.0
    parse_decimal(text)
        .filter(|value| *value >= 0.0)
        .map(|value| value + 0.0)
}

/// Parse common calendar-date text into a date
///
/// Date-only formats are tried first, then date-times (time discarded), then
/// RFC 3339 with an offset, keeping the calendar date as written.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}
