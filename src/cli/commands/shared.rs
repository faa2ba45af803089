//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, input resolution and the import
//! loop every command runs before answering its query.

use crate::app::models::ImportOutcome;
use crate::app::services::tabular_parser::FileFormat;
use crate::cli::args::Args;
use crate::config::SalesConfig;
use crate::constants::STDIN_INPUT;
use crate::{AnalyticsService, Error, Result};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sales_analytics={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from `--config`, else the default location if present
pub fn load_configuration(args: &Args) -> Result<SalesConfig> {
    if let Some(path) = &args.config_file {
        return SalesConfig::from_file(path);
    }

    match SalesConfig::default_config_path() {
        Ok(path) if path.exists() => SalesConfig::from_file(&path),
        Ok(_) => Ok(SalesConfig::default()),
        Err(e) => {
            warn!("Using default configuration: {}", e);
            Ok(SalesConfig::default())
        }
    }
}

/// A resolved input file
///
/// Standard input is spooled into a named temporary file that is removed
/// when the source is dropped, whatever the outcome of the import.
#[derive(Debug)]
pub enum InputSource {
    File(PathBuf),
    Stdin(NamedTempFile),
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            InputSource::File(path) => path,
            InputSource::Stdin(spool) => spool.path(),
        }
    }

    /// Name shown in progress and import reports
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Expand `--input` values into concrete sources, in the order given
pub async fn resolve_inputs(args: &Args) -> anyhow::Result<Vec<InputSource>> {
    let mut sources = Vec::new();

    for input in &args.inputs {
        if input == STDIN_INPUT {
            sources.push(InputSource::Stdin(spool_stdin(&args.stdin_format).await?));
        } else if is_glob_pattern(input) {
            let matches = expand_glob(input)?;
            if matches.is_empty() {
                return Err(Error::configuration(format!(
                    "Input pattern matched no files: {}",
                    input
                ))
                .into());
            }
            debug!("Pattern {} matched {} files", input, matches.len());
            sources.extend(matches.into_iter().map(InputSource::File));
        } else {
            let path = PathBuf::from(input);
            if !path.is_file() {
                return Err(
                    Error::configuration(format!("Input file does not exist: {}", input)).into(),
                );
            }
            sources.push(InputSource::File(path));
        }
    }

    Ok(sources)
}

fn expand_glob(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        let path = entry.with_context(|| format!("Failed to read match for {}", pattern))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

async fn spool_stdin(format_hint: &str) -> anyhow::Result<NamedTempFile> {
    spool_reader(std::io::stdin(), format_hint).await
}

/// Copy a reader into a temporary file carrying the format's extension
///
/// The copy runs on the blocking pool while the temporary file stays owned by
/// this future, so an interrupted read still removes the spool.
async fn spool_reader<R>(mut reader: R, format_hint: &str) -> anyhow::Result<NamedTempFile>
where
    R: Read + Send + 'static,
{
    FileFormat::from_hint(format_hint)?;
    let extension = format_hint.trim().trim_start_matches('.').to_lowercase();

    let spool = tempfile::Builder::new()
        .prefix("sales-stdin-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .context("Failed to create temporary file for standard input")?;
    let mut writer = spool
        .reopen()
        .context("Failed to open standard input spool")?;

    let copied = tokio::task::spawn_blocking(move || -> std::io::Result<u64> {
        let copied = std::io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        Ok(copied)
    })
    .await
    .context("Standard input reader task failed")?
    .context("Failed to read standard input")?;

    debug!("Spooled {} bytes of standard input to {}", copied, spool.path().display());
    Ok(spool)
}

/// Import every source into the service, stopping at the first failure
pub async fn load_inputs(
    service: &AnalyticsService,
    sources: &[InputSource],
    show_progress: bool,
) -> anyhow::Result<Vec<(String, ImportOutcome)>> {
    let progress_bar = if show_progress && sources.len() > 1 {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut imported = Vec::with_capacity(sources.len());
    for source in sources {
        let label = source.label();
        if let Some(pb) = &progress_bar {
            pb.set_message(format!("Importing {}", label));
        }

        let outcome = service
            .ingest_path(source.path())
            .await
            .with_context(|| format!("Failed to import {}", label));
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message(format!("Failed on {}", label));
                }
                return Err(e);
            }
        };

        imported.push((label, outcome));
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Import complete");
    }

    let total: usize = imported.iter().map(|(_, o)| o.imported_count).sum();
    info!("Loaded {} records from {} inputs", total, imported.len());
    Ok(imported)
}
