//! Filter predicates over canonical sales records
//!
//! A [`FilterPredicate`] is built once from [`FilterCriteria`] and then tested
//! against every record. All date parsing happens at build time, so malformed
//! criteria fail before any record is scanned.

use crate::app::models::{FilterCriteria, SalesRecord};
use crate::app::services::record_validator::parse_calendar_date;
use crate::{Error, Result};
use chrono::NaiveDate;

/// Conjunctive test over sales records
///
/// Date bounds are inclusive; product, category and region require exact,
/// case-sensitive equality. A predicate built from empty criteria matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    product: Option<String>,
    category: Option<String>,
    region: Option<String>,
}

impl FilterPredicate {
    /// Predicate matching every record
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Build a predicate, validating date bounds up front
    pub fn build(criteria: &FilterCriteria) -> Result<Self> {
        let start_date = parse_bound("start", criteria.start_date.as_deref())?;
        let end_date = parse_bound("end", criteria.end_date.as_deref())?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(Error::invalid_criteria(format!(
                    "Start date must be before end date ({} is after {})",
                    start, end
                )));
            }
        }

        Ok(Self {
            start_date,
            end_date,
            product: non_blank(criteria.product.as_deref()),
            category: non_blank(criteria.category.as_deref()),
            region: non_blank(criteria.region.as_deref()),
        })
    }

    /// Whether a record satisfies every supplied criterion
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.start_date.is_none_or(|start| record.date() >= start)
            && self.end_date.is_none_or(|end| record.date() <= end)
            && self
                .product
                .as_deref()
                .is_none_or(|product| record.product() == product)
            && self
                .category
                .as_deref()
                .is_none_or(|category| record.category() == category)
            && self
                .region
                .as_deref()
                .is_none_or(|region| record.region() == region)
    }

    /// Whether the predicate imposes no constraint at all
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::match_all()
    }
}

fn parse_bound(which: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };

    parse_calendar_date(text).map(Some).ok_or_else(|| {
        Error::invalid_criteria(format!(
            "Invalid {} date '{}': expected a calendar date such as YYYY-MM-DD",
            which, text
        ))
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
