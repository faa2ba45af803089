//! Filter-then-group aggregation over record snapshots
//!
//! Every query mode runs through [`group_by`]: records that pass the filter
//! predicate are folded into per-key [`Totals`], keyed by whatever the mode's
//! key extractor returns. Summary groups everything under `()`, trends under a
//! bucket key, breakdowns under the dimension value.

use super::bucket::bucket_key;
use crate::app::models::{
    Dimension, DimensionStat, FilterCriteria, Granularity, SalesRecord, Summary, TrendPoint,
};
use crate::app::services::filter::FilterPredicate;
use crate::config::SalesConfig;
use crate::constants::DEFAULT_PRODUCT_LIMIT;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// What an aggregation query computes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    Summary,
    Trend(Granularity),
    Breakdown {
        dimension: Dimension,
        /// Only meaningful for product breakdowns
        limit: Option<usize>,
    },
}

/// Result of an aggregation query, tagged by mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum AggregationResult {
    Summary(Summary),
    Trend(Vec<TrendPoint>),
    Breakdown(Vec<DimensionStat>),
}

/// Running totals for one group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub revenue: f64,
    pub sales: f64,
    pub orders: usize,
}

impl Totals {
    fn add(&mut self, record: &SalesRecord) {
        self.revenue += record.revenue();
        self.sales += record.quantity();
        self.orders += 1;
    }
}

/// Fold records into totals keyed by `key_fn`, ordered by key
pub fn group_by<'a, K, I, F>(records: I, key_fn: F) -> BTreeMap<K, Totals>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
    F: Fn(&'a SalesRecord) -> K,
{
    let mut groups: BTreeMap<K, Totals> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().add(record);
    }
    groups
}

/// Stateless aggregation engine
///
/// Each query is a pure function of the record slice, the criteria and the
/// mode. The engine only carries the default product breakdown limit.
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    default_product_limit: usize,
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self {
            default_product_limit: DEFAULT_PRODUCT_LIMIT,
        }
    }
}

impl AggregationEngine {
    pub fn new(config: &SalesConfig) -> Self {
        Self {
            default_product_limit: config.default_product_limit,
        }
    }

    /// Run a query in any mode
    pub fn aggregate(
        &self,
        records: &[SalesRecord],
        criteria: &FilterCriteria,
        mode: AggregationMode,
    ) -> Result<AggregationResult> {
        Ok(match mode {
            AggregationMode::Summary => AggregationResult::Summary(self.summary(records, criteria)?),
            AggregationMode::Trend(granularity) => {
                AggregationResult::Trend(self.trends(records, criteria, granularity)?)
            }
            AggregationMode::Breakdown { dimension, limit } => {
                AggregationResult::Breakdown(self.breakdown(records, criteria, dimension, limit)?)
            }
        })
    }

    /// Overall totals; all zeros when nothing matches
    pub fn summary(&self, records: &[SalesRecord], criteria: &FilterCriteria) -> Result<Summary> {
        let predicate = FilterPredicate::build(criteria)?;
        let groups = group_by(matching(records, &predicate), |_| ());
        let totals = groups.into_values().next().unwrap_or_default();

        debug!("Summary matched {} records", totals.orders);

        let avg_order_value = if totals.orders == 0 {
            0.0
        } else {
            totals.revenue / totals.orders as f64
        };

        Ok(Summary {
            total_revenue: totals.revenue,
            total_sales: totals.sales,
            total_orders: totals.orders,
            avg_order_value,
        })
    }

    /// Per-bucket totals in ascending bucket order
    pub fn trends(
        &self,
        records: &[SalesRecord],
        criteria: &FilterCriteria,
        granularity: Granularity,
    ) -> Result<Vec<TrendPoint>> {
        let predicate = FilterPredicate::build(criteria)?;
        let groups = group_by(matching(records, &predicate), |record| {
            bucket_key(record.date(), granularity)
        });

        debug!("Trend ({}) produced {} buckets", granularity, groups.len());

        Ok(groups
            .into_iter()
            .map(|(bucket_key, totals)| TrendPoint {
                bucket_key,
                revenue: totals.revenue,
                sales: totals.sales,
                orders: totals.orders,
            })
            .collect())
    }

    /// Per-value totals sorted by descending revenue, ties by ascending key
    ///
    /// Product breakdowns are truncated to `limit` (or the configured default);
    /// category and region breakdowns are never truncated and reject a limit.
    pub fn breakdown(
        &self,
        records: &[SalesRecord],
        criteria: &FilterCriteria,
        dimension: Dimension,
        limit: Option<usize>,
    ) -> Result<Vec<DimensionStat>> {
        let limit = self.resolve_limit(dimension, limit)?;
        let predicate = FilterPredicate::build(criteria)?;
        let groups = group_by(matching(records, &predicate), |record| {
            record.dimension(dimension)
        });

        debug!("Breakdown by {} found {} distinct values", dimension, groups.len());

        let mut stats: Vec<DimensionStat> = groups
            .into_iter()
            .map(|(key, totals)| DimensionStat {
                key: key.to_string(),
                revenue: totals.revenue,
                sales: totals.sales,
                orders: totals.orders,
            })
            .collect();

        stats.sort_by(|a, b| {
            b.revenue
                .total_cmp(&a.revenue)
                .then_with(|| a.key.cmp(&b.key))
        });

        if let Some(limit) = limit {
            stats.truncate(limit);
        }
        Ok(stats)
    }

    fn resolve_limit(&self, dimension: Dimension, limit: Option<usize>) -> Result<Option<usize>> {
        match (dimension, limit) {
            (_, Some(0)) => Err(Error::invalid_criteria(
                "Breakdown limit must be a positive integer",
            )),
            (Dimension::Product, limit) => Ok(Some(limit.unwrap_or(self.default_product_limit))),
            (_, Some(_)) => Err(Error::invalid_criteria(format!(
                "Breakdown limit applies only to products; {} breakdowns are unlimited",
                dimension
            ))),
            (_, None) => Ok(None),
        }
    }
}

fn matching<'a>(
    records: &'a [SalesRecord],
    predicate: &'a FilterPredicate,
) -> impl Iterator<Item = &'a SalesRecord> + 'a {
    records.iter().filter(move |record| predicate.matches(record))
}
