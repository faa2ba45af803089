//! Configuration management and validation.
//!
//! Provides the configuration structure for ingestion and query parameters,
//! with builder-style overrides, JSON file loading and validation rules.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MAX_REPORTED_FAILURES, DEFAULT_PAGE_SIZE,
    DEFAULT_PARALLEL_THRESHOLD, DEFAULT_PRODUCT_LIMIT, MAX_PAGE_SIZE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the store treats records identical to ones it already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Identical records are distinct sales and are all stored
    #[default]
    Allow,
    /// Any duplicate rejects the whole batch; nothing is stored
    RejectBatch,
}

/// Global configuration for sales ingestion and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    /// Number of row failures quoted in an aggregate validation error
    pub max_reported_failures: usize,

    /// Default number of entries in a product breakdown
    pub default_product_limit: usize,

    /// Number of blocking workers used for parallel validation
    pub validation_workers: usize,

    /// Minimum batch size (rows) before validation is fanned out
    pub parallel_threshold: usize,

    /// Store behaviour for duplicate records
    pub duplicate_policy: DuplicatePolicy,

    /// Default page size for record listings
    pub default_page_size: usize,

    /// Largest accepted page size for record listings
    pub max_page_size: usize,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            max_reported_failures: DEFAULT_MAX_REPORTED_FAILURES,
            default_product_limit: DEFAULT_PRODUCT_LIMIT,
            validation_workers: num_cpus::get(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            duplicate_policy: DuplicatePolicy::Allow,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl SalesConfig {
    /// Create configuration with custom validation worker count
    pub fn with_validation_workers(mut self, workers: usize) -> Self {
        self.validation_workers = workers;
        self
    }

    /// Create configuration with custom parallel validation threshold
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    /// Set how many failures an aggregate validation error quotes
    pub fn with_max_reported_failures(mut self, count: usize) -> Self {
        self.max_reported_failures = count;
        self
    }

    /// Set the default product breakdown limit
    pub fn with_default_product_limit(mut self, limit: usize) -> Self {
        self.default_product_limit = limit;
        self
    }

    /// Set the duplicate record policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the default page size for record listings
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Default configuration file location (`<config dir>/sales-analytics/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: SalesConfig = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.validation_workers == 0 {
            return Err(Error::configuration(
                "validation_workers must be at least 1",
            ));
        }
        if self.default_product_limit == 0 {
            return Err(Error::configuration(
                "default_product_limit must be a positive integer",
            ));
        }
        if self.max_page_size == 0 {
            return Err(Error::configuration("max_page_size must be at least 1"));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(Error::configuration(format!(
                "default_page_size must be between 1 and {}",
                self.max_page_size
            )));
        }
        Ok(())
    }
}
