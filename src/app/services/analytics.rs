//! Analytics service: ingestion and queries over a sales store
//!
//! The service wires the tabular parser, the record validator, the store and
//! the aggregation engine together. Ingestion is all-or-nothing: a file that
//! fails to parse or has any invalid row leaves the store untouched. Queries
//! work on a store snapshot, so they never see a batch mid-insert.

use crate::app::models::{
    DateRange, Dimension, DimensionStat, FilterCriteria, FilterOptions, Granularity,
    ImportOutcome, Page, SalesRecord, Summary, TrendPoint,
};
use crate::app::services::aggregation::{AggregationEngine, AggregationMode, AggregationResult};
use crate::app::services::filter::FilterPredicate;
use crate::app::services::record_validator::RecordValidator;
use crate::app::services::sales_store::{InMemorySalesStore, SalesStore};
use crate::app::services::tabular_parser::{FileFormat, TabularFileParser};
use crate::config::SalesConfig;
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

/// Entry point for importing sales files and querying the stored records
#[derive(Debug)]
pub struct AnalyticsService<S: SalesStore = InMemorySalesStore> {
    store: Arc<S>,
    config: SalesConfig,
    parser: TabularFileParser,
    validator: RecordValidator,
    engine: AggregationEngine,
}

impl AnalyticsService<InMemorySalesStore> {
    /// Service backed by a fresh in-memory store honouring the configured duplicate policy
    pub fn in_memory(config: SalesConfig) -> Result<Self> {
        let store = InMemorySalesStore::with_duplicate_policy(config.duplicate_policy);
        Self::new(Arc::new(store), config)
    }
}

impl<S: SalesStore> AnalyticsService<S> {
    /// Create a service over an existing store
    pub fn new(store: Arc<S>, config: SalesConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            parser: TabularFileParser::new(),
            validator: RecordValidator::new(&config),
            engine: AggregationEngine::new(&config),
            config,
        })
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &SalesConfig {
        &self.config
    }

    /// Import file bytes; `format_hint` is a file extension such as `csv` or `xlsx`
    ///
    /// The caller owns any temporary file the bytes came from.
    pub async fn ingest(&self, bytes: Vec<u8>, format_hint: &str) -> Result<ImportOutcome> {
        let format = FileFormat::from_hint(format_hint)?;
        self.ingest_format(bytes, format).await
    }

    /// Read a file and import it, taking the format from its extension
    pub async fn ingest_path(&self, path: &Path) -> Result<ImportOutcome> {
        let format = FileFormat::from_path(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

        info!("Importing {} file: {}", format, path.display());
        self.ingest_format(bytes, format).await
    }

    async fn ingest_format(&self, bytes: Vec<u8>, format: FileFormat) -> Result<ImportOutcome> {
        let parser = self.parser;
        let rows = task::spawn_blocking(move || parser.parse_format(&bytes, format))
            .await
            .map_err(|e| Error::processing_interrupted(format!("Parser worker failed: {}", e)))??;

        let records = self.validator.validate_batch(rows).await?;
        let imported_count = self.store.insert_batch(records)?;

        info!("Imported {} records", imported_count);
        Ok(ImportOutcome { imported_count })
    }

    /// Run any aggregation mode against the current snapshot
    pub fn query(&self, criteria: &FilterCriteria, mode: AggregationMode) -> Result<AggregationResult> {
        let snapshot = self.store.snapshot()?;
        self.engine.aggregate(&snapshot, criteria, mode)
    }

    pub fn summary(&self, criteria: &FilterCriteria) -> Result<Summary> {
        let snapshot = self.store.snapshot()?;
        self.engine.summary(&snapshot, criteria)
    }

    pub fn trends(
        &self,
        criteria: &FilterCriteria,
        granularity: Granularity,
    ) -> Result<Vec<TrendPoint>> {
        let snapshot = self.store.snapshot()?;
        self.engine.trends(&snapshot, criteria, granularity)
    }

    /// Per-dimension totals; `limit` applies to product breakdowns only
    pub fn breakdown(
        &self,
        dimension: Dimension,
        criteria: &FilterCriteria,
        limit: Option<usize>,
    ) -> Result<Vec<DimensionStat>> {
        let snapshot = self.store.snapshot()?;
        self.engine.breakdown(&snapshot, criteria, dimension, limit)
    }

    /// Sorted distinct values of one dimension across all stored records
    pub fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>> {
        self.store.distinct_values(dimension)
    }

    /// Distinct products, categories and regions, each sorted
    pub fn filter_options(&self) -> Result<FilterOptions> {
        Ok(FilterOptions {
            products: self.store.distinct_values(Dimension::Product)?,
            categories: self.store.distinct_values(Dimension::Category)?,
            regions: self.store.distinct_values(Dimension::Region)?,
        })
    }

    pub fn date_range(&self) -> Result<Option<DateRange>> {
        self.store.date_range()
    }

    /// Matching records, newest first, one page at a time
    ///
    /// `page` defaults to 1 and `limit` to the configured page size; records
    /// sharing a date keep their import order.
    pub fn list_records(
        &self,
        criteria: &FilterCriteria,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Page<SalesRecord>> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(Error::invalid_criteria("Page must be a positive integer"));
        }
        let limit = limit.unwrap_or(self.config.default_page_size);
        if limit == 0 || limit > self.config.max_page_size {
            return Err(Error::invalid_criteria(format!(
                "Limit must be between 1 and {}",
                self.config.max_page_size
            )));
        }

        let predicate = FilterPredicate::build(criteria)?;
        let snapshot = self.store.snapshot()?;
        let mut matched: Vec<&SalesRecord> = snapshot
            .iter()
            .filter(|record| predicate.matches(record))
            .collect();
        matched.sort_by(|a, b| b.date().cmp(&a.date()));

        let total = matched.len();
        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .collect();

        debug!("Listing page {} of {} matched records", page, total);
        Ok(Page {
            items,
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        })
    }

    /// Delete every stored record, returning how many were removed
    pub fn clear(&self) -> Result<usize> {
        let removed = self.store.delete_all()?;
        info!("Cleared {} records", removed);
        Ok(removed)
    }
}
