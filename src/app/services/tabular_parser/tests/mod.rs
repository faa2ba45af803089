//! Test utilities for the tabular file parser
//!
//! Shared fixtures for CSV content, in-memory sheet ranges and xlsx workbooks.

use calamine::{Data, Range};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

mod format_tests;

/// Header row with the seven required fields in mixed casing and padding
pub const MIXED_CASE_HEADER: &str = " Date ,PRODUCT,Category, region ,Quantity,PRICE,Revenue";

/// Two valid data rows matching the header above
pub const TWO_DATA_ROWS: &str = "2024-01-01,Laptop,Electronics,East,4,507,2028\n\
                                 2024-01-01,Smartphone,Electronics,North,9,228,2052\n";

/// Build CSV content from a header and data rows
pub fn csv_content(header: &str, rows: &str) -> Vec<u8> {
    format!("{}\n{}", header, rows).into_bytes()
}

/// Build a sheet range from rows of optional string cells (`None` = empty cell)
pub fn sheet(rows: &[&[Option<&str>]]) -> Range<Data> {
    let height = rows.len() as u32;
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
    let mut range = Range::new((0, 0), (height - 1, width - 1));

    for (r, cells) in rows.iter().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            if let Some(value) = cell {
                range.set_value((r as u32, c as u32), Data::String(value.to_string()));
            }
        }
    }
    range
}

/// Build a two-sheet xlsx workbook
///
/// The first sheet has padded mixed-case headers, a numeric row, a blank row
/// and a row with a date-formatted cell and no quantity. The second sheet
/// holds unrelated data.
pub fn two_sheet_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sales = workbook.add_worksheet();
    sales.set_name("Sales").unwrap();
    for (col, header) in [" Date", "PRODUCT", "Quantity", "Revenue "].iter().enumerate() {
        sales.write_string(0, col as u16, *header).unwrap();
    }
    sales.write_string(1, 0, "2024-01-01").unwrap();
    sales.write_string(1, 1, "Laptop").unwrap();
    sales.write_number(1, 2, 4.0).unwrap();
    sales.write_number(1, 3, 2028.0).unwrap();

    let date = ExcelDateTime::from_ymd(2024, 2, 3).unwrap();
    sales.write_datetime_with_format(3, 0, &date, &date_format).unwrap();
    sales.write_string(3, 1, "Desk").unwrap();
    sales.write_number(3, 3, 300.0).unwrap();

    let other = workbook.add_worksheet();
    other.set_name("Other").unwrap();
    other.write_string(0, 0, "other").unwrap();
    other.write_string(1, 0, "x").unwrap();

    workbook.save_to_buffer().unwrap()
}
