//! Record storage behind a trait seam
//!
//! [`SalesStore`] is what the analytics service talks to. Reads hand out
//! immutable snapshots, so a query never observes a half-written batch and a
//! bulk delete is all-or-nothing from a reader's point of view.
//!
//! [`InMemorySalesStore`] keeps records in a `RwLock<Arc<Vec<_>>>`. Readers
//! clone the `Arc` and drop the lock straight away; writers copy-on-write
//! through [`Arc::make_mut`] and publish the new vector in one step.

use crate::app::models::{DateRange, Dimension, RecordIdentity, SalesRecord};
use crate::config::DuplicatePolicy;
use crate::{Error, Result};
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Storage for canonical sales records
pub trait SalesStore: Send + Sync {
    /// Append a validated batch atomically, returning the number stored
    fn insert_batch(&self, records: Vec<SalesRecord>) -> Result<usize>;

    /// Consistent view of every stored record at the time of the call
    fn snapshot(&self) -> Result<Arc<Vec<SalesRecord>>>;

    /// Remove every record atomically, returning how many were removed
    fn delete_all(&self) -> Result<usize>;

    /// Number of stored records
    fn len(&self) -> Result<usize> {
        Ok(self.snapshot()?.len())
    }

    /// Whether the store holds no records
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Sorted distinct values of a dimension across all stored records
    fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>> {
        let snapshot = self.snapshot()?;
        let values: BTreeSet<&str> = snapshot
            .iter()
            .map(|record| record.dimension(dimension))
            .collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    /// Earliest and latest stored dates, or `None` when empty
    fn date_range(&self) -> Result<Option<DateRange>> {
        let snapshot = self.snapshot()?;
        let mut dates = snapshot.iter().map(SalesRecord::date);
        let Some(first) = dates.next() else {
            return Ok(None);
        };
        let (min_date, max_date) =
            dates.fold((first, first), |(min, max), date| (min.min(date), max.max(date)));
        Ok(Some(DateRange { min_date, max_date }))
    }
}

/// Process-local store with snapshot reads
#[derive(Debug, Default)]
pub struct InMemorySalesStore {
    records: RwLock<Arc<Vec<SalesRecord>>>,
    duplicate_policy: DuplicatePolicy,
}

impl InMemorySalesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(policy: DuplicatePolicy) -> Self {
        Self {
            records: RwLock::default(),
            duplicate_policy: policy,
        }
    }
}

/// Find the first record of `batch` that repeats a stored record or an
/// earlier record of the same batch; returns its 1-based batch position
fn first_duplicate(stored: &[SalesRecord], batch: &[SalesRecord]) -> Option<usize> {
    let mut seen: HashSet<RecordIdentity> = stored.iter().map(SalesRecord::identity).collect();
    batch
        .iter()
        .position(|record| !seen.insert(record.identity()))
        .map(|index| index + 1)
}

impl SalesStore for InMemorySalesStore {
    fn insert_batch(&self, records: Vec<SalesRecord>) -> Result<usize> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| Error::store_unavailable("Record store lock poisoned"))?;

        if self.duplicate_policy == DuplicatePolicy::RejectBatch {
            if let Some(position) = first_duplicate(&guard, &records) {
                return Err(Error::store_conflict(format!(
                    "Record {} of the batch duplicates an existing record; nothing was imported",
                    position
                )));
            }
        }

        let count = records.len();
        Arc::make_mut(&mut guard).extend(records);
        info!("Stored {} records ({} total)", count, guard.len());
        Ok(count)
    }

    fn snapshot(&self) -> Result<Arc<Vec<SalesRecord>>> {
        let guard = self
            .records
            .read()
            .map_err(|_| Error::store_unavailable("Record store lock poisoned"))?;
        Ok(Arc::clone(&guard))
    }

    fn delete_all(&self) -> Result<usize> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| Error::store_unavailable("Record store lock poisoned"))?;
        let removed = std::mem::take(&mut *guard).len();
        debug!("Deleted {} records", removed);
        Ok(removed)
    }
}
