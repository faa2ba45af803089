//! Human-readable and JSON rendering of command results

use crate::app::models::{
    DateRange, Dimension, DimensionStat, FilterOptions, Granularity, ImportOutcome, Page,
    SalesRecord, Summary, TrendPoint,
};
use crate::cli::args::OutputFormat;
use colored::*;
use serde::Serialize;
use std::fmt::Write as _;

/// One imported file in the `import` report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedFile {
    pub file: String,
    #[serde(flatten)]
    pub outcome: ImportOutcome,
}

/// Filter options together with the stored date range
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersReport {
    #[serde(flatten)]
    pub options: FilterOptions,
    pub date_range: Option<DateRange>,
}

/// Print a result as pretty JSON or as the rendered table
pub fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    render: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => print!("{}", render(value)),
    }
    Ok(())
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn render_imports(files: &[ImportedFile]) -> String {
    let mut out = String::new();
    for file in files {
        let _ = writeln!(
            out,
            "{} {} ({} records)",
            "✓".green(),
            file.file,
            file.outcome.imported_count
        );
    }
    let total: usize = files.iter().map(|f| f.outcome.imported_count).sum();
    let _ = writeln!(out, "{} {} records from {} files", "Imported".bold(), total, files.len());
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Sales Summary".bold());
    let _ = writeln!(out, "  Total revenue:       {:>14}", money(summary.total_revenue));
    let _ = writeln!(out, "  Units sold:          {:>14}", summary.total_sales);
    let _ = writeln!(out, "  Orders:              {:>14}", summary.total_orders);
    let _ = writeln!(out, "  Average order value: {:>14}", money(summary.avg_order_value));
    out
}

pub fn render_trends(granularity: Granularity, points: &[TrendPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<12} {:>14} {:>10} {:>8}",
            granularity.as_str(),
            "revenue",
            "units",
            "orders"
        )
        .bold()
    );
    for point in points {
        let _ = writeln!(
            out,
            "{:<12} {:>14} {:>10} {:>8}",
            point.bucket_key,
            money(point.revenue),
            point.sales,
            point.orders
        );
    }
    if points.is_empty() {
        let _ = writeln!(out, "{}", "No matching records".yellow());
    }
    out
}

pub fn render_breakdown(dimension: Dimension, stats: &[DimensionStat]) -> String {
    let width = stats
        .iter()
        .map(|s| s.key.chars().count())
        .max()
        .unwrap_or(0)
        .max(dimension.as_str().len());

    let mut out = String::new();
    let header = format!(
        "{:<width$} {:>14} {:>10} {:>8}",
        dimension.as_str(),
        "revenue",
        "units",
        "orders",
        width = width
    );
    let _ = writeln!(out, "{}", header.bold());
    for stat in stats {
        let _ = writeln!(
            out,
            "{:<width$} {:>14} {:>10} {:>8}",
            stat.key,
            money(stat.revenue),
            stat.sales,
            stat.orders,
            width = width
        );
    }
    if stats.is_empty() {
        let _ = writeln!(out, "{}", "No matching records".yellow());
    }
    out
}

pub fn render_filters(report: &FiltersReport) -> String {
    let mut out = String::new();
    for (title, values) in [
        ("Products", &report.options.products),
        ("Categories", &report.options.categories),
        ("Regions", &report.options.regions),
    ] {
        let _ = writeln!(out, "{} ({})", title.bold(), values.len());
        for value in values {
            let _ = writeln!(out, "  {}", value);
        }
    }
    match &report.date_range {
        Some(range) => {
            let _ = writeln!(
                out,
                "{} {} to {}",
                "Dates".bold(),
                range.min_date,
                range.max_date
            );
        }
        None => {
            let _ = writeln!(out, "{} none", "Dates".bold());
        }
    }
    out
}

pub fn render_records(page: &Page<SalesRecord>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<10} {:<20} {:<16} {:<10} {:>8} {:>10} {:>12}",
            "date", "product", "category", "region", "quantity", "price", "revenue"
        )
        .bold()
    );
    for record in &page.items {
        let _ = writeln!(
            out,
            "{:<10} {:<20} {:<16} {:<10} {:>8} {:>10} {:>12}",
            record.date(),
            record.product(),
            record.category(),
            record.region(),
            record.quantity(),
            money(record.price()),
            money(record.revenue())
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} matching records)",
        page.page,
        page.pages.max(1),
        page.total
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_summary_values() {
        let text = render_summary(&Summary {
            total_revenue: 4080.0,
            total_sales: 13.0,
            total_orders: 2,
            avg_order_value: 2040.0,
        });
        assert!(text.contains("4080.00"));
        assert!(text.contains("2040.00"));
        assert!(text.contains("13"));
    }

    #[test]
    fn test_render_breakdown_rows_in_order() {
        let stats = vec![
            DimensionStat {
                key: "Smartphone".to_string(),
                revenue: 2052.0,
                sales: 9.0,
                orders: 1,
            },
            DimensionStat {
                key: "Laptop".to_string(),
                revenue: 2028.0,
                sales: 4.0,
                orders: 1,
            },
        ];
        let text = render_breakdown(Dimension::Product, &stats);

        let smartphone = text.find("Smartphone").unwrap();
        let laptop = text.find("Laptop").unwrap();
        assert!(smartphone < laptop);
        assert!(text.contains("2052.00"));
    }

    #[test]
    fn test_render_empty_trend() {
        let text = render_trends(Granularity::Week, &[]);
        assert!(text.contains("No matching records"));
    }

    #[test]
    fn test_filters_report_json_shape() {
        let report = FiltersReport {
            options: FilterOptions {
                products: vec!["Laptop".to_string()],
                categories: vec!["Electronics".to_string()],
                regions: vec!["East".to_string()],
            },
            date_range: Some(DateRange {
                min_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                max_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            }),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["products"][0], "Laptop");
        assert_eq!(json["dateRange"]["minDate"], "2024-01-01");
        assert!(render_filters(&report).contains("2024-01-01 to 2024-01-31"));
    }

    #[test]
    fn test_imported_file_json_is_flat() {
        let file = ImportedFile {
            file: "sales.csv".to_string(),
            outcome: ImportOutcome { imported_count: 2 },
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["file"], "sales.csv");
        assert_eq!(json["importedCount"], 2);
    }
}
