//! Core data structures for sales ingestion and analytics
//!
//! Defines raw rows produced by file parsing, the canonical sales record,
//! validation failures, filter criteria, query parameters and the result
//! shapes returned by the aggregation engine.

use crate::constants::{DIMENSIONS, GRANULARITIES, fields};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One unvalidated row from an input file
///
/// Keys are header names trimmed and lower-cased at construction, values are
/// trimmed, so `Date`, ` DATE ` and `date` all address the same field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from header/value pairs, normalizing keys and values
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = Self::new();
        for (key, value) in pairs {
            row.insert(key.as_ref(), value.as_ref());
        }
        row
    }

    /// Insert a field; headers that are blank after trimming are ignored
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = normalize_key(key);
        if key.is_empty() {
            return;
        }
        self.fields.insert(key, value.trim().to_string());
    }

    /// Look up a field by its normalized (lower-case) name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Number of fields in the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether every field value is empty
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|value| value.is_empty())
    }
}

/// Canonical header key: trimmed, lower-cased, without a byte-order mark
pub fn normalize_key(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// A fully validated sales record
///
/// Fields are private so the invariants checked in [`SalesRecord::new`] hold
/// for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    date: NaiveDate,
    product: String,
    category: String,
    region: String,
    quantity: f64,
    price: f64,
    revenue: f64,
}

impl SalesRecord {
    /// Create a record, trimming text fields and checking invariants
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        quantity: f64,
        price: f64,
        revenue: f64,
    ) -> Result<Self> {
        let product = required_text(fields::PRODUCT, product.into())?;
        let category = required_text(fields::CATEGORY, category.into())?;
        let region = required_text(fields::REGION, region.into())?;

        for (name, value) in [
            (fields::QUANTITY, quantity),
            (fields::PRICE, price),
            (fields::REVENUE, revenue),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_record(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            date,
            product,
            category,
            region,
            // normalizes -0.0
            quantity: quantity + 0.0,
            price: price + 0.0,
            revenue: revenue + 0.0,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Value of a categorical dimension
    pub fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Product => &self.product,
            Dimension::Category => &self.category,
            Dimension::Region => &self.region,
        }
    }

    /// Identity used for duplicate detection: all seven fields, numbers by bit pattern
    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity {
            date: self.date,
            product: self.product.clone(),
            category: self.category.clone(),
            region: self.region.clone(),
            quantity: self.quantity.to_bits(),
            price: self.price.to_bits(),
            revenue: self.revenue.to_bits(),
        }
    }
}

fn required_text(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_record(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Hashable identity of a [`SalesRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordIdentity {
    date: NaiveDate,
    product: String,
    category: String,
    region: String,
    quantity: u64,
    price: u64,
    revenue: u64,
}

/// A single row that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// 1-based position of the row in its batch
    pub row_index: usize,
    /// Human-readable description naming the field and offending value
    pub message: String,
}

impl ValidationFailure {
    pub fn new(row_index: usize, message: impl Into<String>) -> Self {
        Self {
            row_index,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Optional constraints narrowing which records a query considers
///
/// Dates are kept as text here and parsed when a predicate is built, so a
/// malformed bound is reported before any record is scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub product: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
}

impl FilterCriteria {
    /// Criteria matching every record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Time bucket size for trend queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(Error::invalid_criteria(format!(
                "Invalid granularity '{}': must be one of: {}",
                other,
                GRANULARITIES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical dimension for breakdowns and filter-option discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Product,
    Category,
    Region,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Product, Dimension::Category, Dimension::Region];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Product => "product",
            Dimension::Category => "category",
            Dimension::Region => "region",
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "product" | "products" => Ok(Dimension::Product),
            "category" | "categories" => Ok(Dimension::Category),
            "region" | "regions" => Ok(Dimension::Region),
            other => Err(Error::invalid_criteria(format!(
                "Invalid dimension '{}': must be one of: {}",
                other,
                DIMENSIONS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall totals for the matched records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_revenue: f64,
    pub total_sales: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
}

/// Totals for one time bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub bucket_key: String,
    pub revenue: f64,
    pub sales: f64,
    pub orders: usize,
}

/// Totals for one value of a categorical dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionStat {
    pub key: String,
    pub revenue: f64,
    pub sales: f64,
    pub orders: usize,
}

/// Outcome of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported_count: usize,
}

/// Distinct values per dimension, each sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub regions: Vec<String>,
}

/// Earliest and latest stored record dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}
