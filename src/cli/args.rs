//! Command-line argument definitions for the sales analytics tool
//!
//! The CLI is stateless between runs: every invocation loads its `--input`
//! files into a fresh in-memory store and then answers one query.

use crate::app::models::{Dimension, FilterCriteria, Granularity};
use crate::constants::STDIN_INPUT;
use crate::{Error, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sales analytics tool
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sales-analytics",
    version,
    about = "Import sales spreadsheets and query revenue summaries, trends and breakdowns",
    long_about = "Imports sales records from CSV files and spreadsheet workbooks (xlsx, xls, \
                  xlsm, xlsb, ods), validates every row, and answers summary, trend and \
                  breakdown queries. A file with any invalid row is rejected as a whole."
)]
pub struct Args {
    /// Input files, glob patterns, or `-` for standard input (repeatable)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH|GLOB|-",
        global = true,
        action = ArgAction::Append,
        help = "Input file, glob pattern or '-' for stdin (repeatable)"
    )]
    pub inputs: Vec<String>,

    /// Format of data read from standard input
    #[arg(
        long = "stdin-format",
        value_name = "EXT",
        global = true,
        default_value = "csv",
        help = "Format of data read from stdin (csv, xlsx, ...)"
    )]
    pub stdin_format: String,

    /// Path to a JSON configuration file
    ///
    /// If not specified, `<config dir>/sales-analytics/config.json` is used
    /// when it exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        global = true,
        default_value = "table",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress progress and informational output"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import input files and report how many records each contributed
    Import,
    /// Total revenue, units sold, order count and average order value
    Summary(FilterArgs),
    /// Totals per day, ISO week or month
    Trends(TrendsArgs),
    /// Totals per product, category or region, highest revenue first
    Breakdown(BreakdownArgs),
    /// Distinct products, categories and regions plus the stored date range
    Filters,
    /// List matching records, newest first
    Records(RecordsArgs),
}

/// Filter flags shared by the query commands
#[derive(Debug, Clone, Default, Parser)]
pub struct FilterArgs {
    /// Earliest date to include (inclusive)
    #[arg(long = "start-date", value_name = "DATE")]
    pub start_date: Option<String>,

    /// Latest date to include (inclusive)
    #[arg(long = "end-date", value_name = "DATE")]
    pub end_date: Option<String>,

    /// Only include this product (exact match)
    #[arg(long = "product", value_name = "NAME")]
    pub product: Option<String>,

    /// Only include this category (exact match)
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Only include this region (exact match)
    #[arg(long = "region", value_name = "NAME")]
    pub region: Option<String>,
}

/// Arguments for the trends command
#[derive(Debug, Clone, Parser)]
pub struct TrendsArgs {
    /// Bucket size: day, week or month
    #[arg(short = 'g', long = "granularity", default_value = "day")]
    pub granularity: Granularity,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the breakdown command
#[derive(Debug, Clone, Parser)]
pub struct BreakdownArgs {
    /// Dimension to group by: product, category or region
    #[arg(value_name = "DIMENSION")]
    pub dimension: Dimension,

    /// Maximum number of products to show (product breakdowns only)
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the records command
#[derive(Debug, Clone, Parser)]
pub struct RecordsArgs {
    /// Page number, starting at 1
    #[arg(long = "page", value_name = "N")]
    pub page: Option<usize>,

    /// Records per page
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Pretty-printed JSON for scripting
    Json,
}

impl Args {
    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Whether progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::configuration(
                "No input files given; pass one or more with --input",
            ));
        }

        let stdin_count = self
            .inputs
            .iter()
            .filter(|input| input.as_str() == STDIN_INPUT)
            .count();
        if stdin_count > 1 {
            return Err(Error::configuration(
                "Standard input ('-') can only be given once",
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }
}

impl FilterArgs {
    /// Convert flags into filter criteria
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            product: self.product.clone(),
            category: self.category.clone(),
            region: self.region.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sales-analytics").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["summary", "-i", "a.csv", "--input", "b.xlsx", "--format", "json"]);

        assert_eq!(args.inputs, vec!["a.csv", "b.xlsx"]);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(matches!(args.command, Some(Commands::Summary(_))));
    }

    #[test]
    fn test_filter_flags_become_criteria() {
        let args = parse(&[
            "-i",
            "sales.csv",
            "summary",
            "--start-date",
            "2024-01-01",
            "--region",
            "East",
        ]);

        let Some(Commands::Summary(filters)) = args.command else {
            panic!("expected summary command");
        };
        let criteria = filters.to_criteria();
        assert_eq!(criteria.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(criteria.region.as_deref(), Some("East"));
        assert_eq!(criteria.product, None);
    }

    #[test]
    fn test_trends_granularity_parsing() {
        let args = parse(&["-i", "s.csv", "trends", "--granularity", "week"]);
        let Some(Commands::Trends(trends)) = args.command else {
            panic!("expected trends command");
        };
        assert_eq!(trends.granularity, Granularity::Week);

        let args = parse(&["-i", "s.csv", "trends"]);
        let Some(Commands::Trends(trends)) = args.command else {
            panic!("expected trends command");
        };
        assert_eq!(trends.granularity, Granularity::Day);

        let result = Args::try_parse_from(["sales-analytics", "trends", "-g", "year"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_breakdown_dimension_and_limit() {
        let args = parse(&["-i", "s.csv", "breakdown", "products", "--limit", "5"]);
        let Some(Commands::Breakdown(breakdown)) = args.command else {
            panic!("expected breakdown command");
        };
        assert_eq!(breakdown.dimension, Dimension::Product);
        assert_eq!(breakdown.limit, Some(5));

        assert!(Args::try_parse_from(["sales-analytics", "breakdown", "store"]).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["import"]).get_log_level(), "info");
        assert_eq!(parse(&["import", "-v"]).get_log_level(), "debug");
        assert_eq!(parse(&["import", "-vv"]).get_log_level(), "trace");
        assert_eq!(parse(&["import", "-q"]).get_log_level(), "warn");
        assert!(!parse(&["import", "-q"]).show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["sales-analytics", "import", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(parse(&["import"]).validate().is_err());
        assert!(parse(&["import", "-i", "-", "-i", "-"]).validate().is_err());
        assert!(parse(&["import", "-i", "a.csv", "-i", "-"]).validate().is_ok());

        let missing = parse(&["import", "-i", "a.csv", "--config", "/no/such/config.json"]);
        assert!(matches!(
            missing.validate(),
            Err(Error::Configuration { .. })
        ));

        let config = NamedTempFile::new().unwrap();
        let present = parse(&[
            "import",
            "-i",
            "a.csv",
            "--config",
            config.path().to_str().unwrap(),
        ]);
        assert!(present.validate().is_ok());
    }
}
