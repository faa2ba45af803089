//! Format hint resolution
//!
//! Maps a file extension or explicit hint onto one of the supported
//! container formats.

use crate::constants::{CSV_EXTENSIONS, WORKBOOK_EXTENSIONS};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Container formats the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Delimited text with a header row
    Csv,
    /// Spreadsheet workbook (xlsx, xls, xlsm, xlsb, ods); first sheet only
    Workbook,
}

impl FileFormat {
    /// Resolve a format hint such as `csv`, `.XLSX` or `ods`
    pub fn from_hint(hint: &str) -> Result<Self> {
        let normalized = hint.trim().trim_start_matches('.').to_lowercase();

        if CSV_EXTENSIONS.contains(&normalized.as_str()) {
            Ok(FileFormat::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&normalized.as_str()) {
            Ok(FileFormat::Workbook)
        } else {
            Err(Error::unsupported_format(hint.trim()))
        }
    }

    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::unsupported_format(path.display().to_string()))?;
        Self::from_hint(extension)
    }

    /// Human-readable format name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Workbook => "workbook",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
