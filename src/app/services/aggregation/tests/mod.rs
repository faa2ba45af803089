//! Tests for the aggregation engine
//!
//! Fixtures build canonical records directly, bypassing file parsing and
//! validation.


use crate::app::models::SalesRecord;
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` fixture date
pub fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

/// Create a record; price is derived from revenue and quantity
pub fn sale(date: &str, product: &str, category: &str, region: &str, quantity: f64, revenue: f64) -> SalesRecord {
    let price = if quantity > 0.0 { revenue / quantity } else { 0.0 };
    SalesRecord::new(day(date), product, category, region, quantity, price, revenue).unwrap()
}

/// The two-row import used throughout the end-to-end scenario
pub fn laptop_and_smartphone() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new(day("2024-01-01"), "Laptop", "Electronics", "East", 4.0, 507.0, 2028.0)
            .unwrap(),
        SalesRecord::new(day("2024-01-01"), "Smartphone", "Electronics", "North", 9.0, 228.0, 2052.0)
            .unwrap(),
    ]
}

/// A month of mixed sales across categories and regions
pub fn mixed_sales() -> Vec<SalesRecord> {
    vec![
        sale("2024-01-01", "Laptop", "Electronics", "East", 2.0, 2000.0),
        sale("2024-01-02", "Desk", "Furniture", "West", 1.0, 350.0),
        sale("2024-01-08", "Laptop", "Electronics", "West", 1.0, 1000.0),
        sale("2024-01-15", "Chair", "Furniture", "East", 4.0, 400.0),
        sale("2024-01-31", "Monitor", "Electronics", "North", 3.0, 900.0),
        sale("2024-02-01", "Desk", "Furniture", "North", 2.0, 700.0),
    ]
}
