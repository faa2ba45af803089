//! Format dispatch for the tabular file parser

use super::csv_reader::CsvRowReader;
use super::format::FileFormat;
use super::workbook_reader::read_workbook;
use crate::app::models::RawRow;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Parser turning CSV or workbook bytes into raw rows
///
/// The parser keeps no state between calls; output order always matches the
/// order of rows in the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct TabularFileParser;

impl TabularFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse file bytes using a format hint derived from the file extension
    pub fn parse(&self, bytes: &[u8], format_hint: &str) -> Result<Vec<RawRow>> {
        let format = FileFormat::from_hint(format_hint)?;
        self.parse_format(bytes, format)
    }

    /// Parse file bytes in an already-resolved format
    pub fn parse_format(&self, bytes: &[u8], format: FileFormat) -> Result<Vec<RawRow>> {
        let rows = match format {
            FileFormat::Csv => {
                let mut reader = CsvRowReader::new(bytes)?;
                let rows = reader.by_ref().collect::<Result<Vec<_>>>()?;
                if reader.blank_rows_skipped() > 0 {
                    debug!("Skipped {} blank CSV rows", reader.blank_rows_skipped());
                }
                rows
            }
            FileFormat::Workbook => read_workbook(bytes)?,
        };

        debug!("Parsed {} rows from {}", rows.len(), format);
        Ok(rows)
    }

    /// Read and parse a file, detecting the format from its extension
    pub fn parse_path(&self, path: &Path) -> Result<Vec<RawRow>> {
        let format = FileFormat::from_path(path)?;
        info!("Parsing {} file: {}", format, path.display());

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;
        self.parse_format(&bytes, format)
    }
}
