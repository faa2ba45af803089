//! Application constants for the sales analytics crate
//!
//! This module contains the record field names, supported file formats,
//! default limits and date formats used throughout the application.

// =============================================================================
// Record Fields
// =============================================================================

/// Canonical record field names, as they appear (lower-cased) in file headers
pub mod fields {
    pub const DATE: &str = "date";
    pub const PRODUCT: &str = "product";
    pub const CATEGORY: &str = "category";
    pub const REGION: &str = "region";
    pub const QUANTITY: &str = "quantity";
    pub const PRICE: &str = "price";
    pub const REVENUE: &str = "revenue";

    /// All seven required fields, in the order rows are checked
    pub const REQUIRED: &[&str] = &[DATE, PRODUCT, CATEGORY, REGION, QUANTITY, PRICE, REVENUE];
}

// =============================================================================
// File Formats
// =============================================================================

/// Format hints recognized as delimited text
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// Format hints recognized as spreadsheet workbooks
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

// =============================================================================
// Validation
// =============================================================================

/// Number of row failures quoted verbatim in an aggregate validation error
pub const DEFAULT_MAX_REPORTED_FAILURES: usize = 10;

/// Batches smaller than this are validated inline rather than fanned out
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Date-only formats accepted for record dates and filter bounds
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-time formats accepted for record dates (only the calendar date is kept)
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// =============================================================================
// Queries
// =============================================================================

/// Valid trend granularities
pub const GRANULARITIES: &[&str] = &["day", "week", "month"];

/// Valid breakdown dimensions
pub const DIMENSIONS: &[&str] = &["product", "category", "region"];

/// Default number of entries in a product breakdown
pub const DEFAULT_PRODUCT_LIMIT: usize = 10;

/// Default page size for record listings
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Largest page size a record listing accepts
pub const MAX_PAGE_SIZE: usize = 1000;

// =============================================================================
// CLI
// =============================================================================

/// Application directory name used under the user's config directory
pub const APP_DIR_NAME: &str = "sales-analytics";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Input path meaning "read from standard input"
pub const STDIN_INPUT: &str = "-";

/// Get the current application version
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
