//! Command implementations for the sales analytics CLI
//!
//! Every command follows the same path: set up logging, load configuration,
//! import the `--input` files into a fresh in-memory store, then answer the
//! requested query in table or JSON form.

pub mod report;
pub mod shared;

use crate::AnalyticsService;
use crate::cli::args::{Args, Commands};
use crate::constants::get_version;
use anyhow::Context;
use report::{FiltersReport, ImportedFile, emit};
use shared::{load_configuration, load_inputs, resolve_inputs, setup_logging};
use tracing::{debug, info};

/// Main command runner
pub async fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(&args)?;
    info!("Starting sales-analytics v{}", get_version());
    debug!("Command line arguments: {:?}", args);

    let command = args
        .command
        .clone()
        .context("No command given; run with --help to list commands")?;
    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);
    let service = AnalyticsService::in_memory(config)?;

    let sources = resolve_inputs(&args).await?;
    info!("Importing {} inputs", sources.len());
    let imported = load_inputs(&service, &sources, args.show_progress()).await?;

    let format = args.output_format;
    match command {
        Commands::Import => {
            let files: Vec<ImportedFile> = imported
                .into_iter()
                .map(|(file, outcome)| ImportedFile { file, outcome })
                .collect();
            emit(format, &files, |files| report::render_imports(files))
        }
        Commands::Summary(filters) => {
            let summary = service.summary(&filters.to_criteria())?;
            emit(format, &summary, report::render_summary)
        }
        Commands::Trends(trends) => {
            let points = service.trends(&trends.filters.to_criteria(), trends.granularity)?;
            emit(format, &points, |points| {
                report::render_trends(trends.granularity, points)
            })
        }
        Commands::Breakdown(breakdown) => {
            let stats = service.breakdown(
                breakdown.dimension,
                &breakdown.filters.to_criteria(),
                breakdown.limit,
            )?;
            emit(format, &stats, |stats| {
                report::render_breakdown(breakdown.dimension, stats)
            })
        }
        Commands::Filters => {
            let filters = FiltersReport {
                options: service.filter_options()?,
                date_range: service.date_range()?,
            };
            emit(format, &filters, report::render_filters)
        }
        Commands::Records(records) => {
            let page =
                service.list_records(&records.filters.to_criteria(), records.page, records.limit)?;
            emit(format, &page, report::render_records)
        }
    }
}
