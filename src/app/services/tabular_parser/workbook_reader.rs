//! Spreadsheet workbook reader
//!
//! Workbooks are parsed eagerly. Only the first sheet is consulted; its first
//! row is the header and every later non-blank row becomes a [`RawRow`].

use crate::app::models::{RawRow, normalize_key};
use crate::{Error, Result};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveTime;
use std::io::Cursor;
use tracing::debug;

/// Parse workbook bytes (format sniffed from content) into raw rows
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::parse_with_source("workbook", e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| Error::parse("workbook", "Workbook has no sheets"))?;

    debug!(
        "Reading sheet '{}' (first of {} sheets)",
        sheet_name,
        sheet_names.len()
    );

    let range = workbook.worksheet_range(sheet_name)?;
    Ok(rows_from_range(&range))
}

/// Convert a sheet range into raw rows
///
/// Missing cells become empty strings and fully blank rows are skipped.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();

    let Some(header_cells) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| normalize_key(&cell_to_string(cell)))
        .collect();

    rows.filter_map(|cells| {
        let mut row = RawRow::new();
        for (index, header) in headers.iter().enumerate() {
            let value = cells.get(index).map(cell_to_string).unwrap_or_default();
            row.insert(header, &value);
        }
        (!row.is_blank()).then_some(row)
    })
    .collect()
}

/// Render a cell the way it would read as text
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}
