//! Streaming CSV row reader
//!
//! Reads the header once, normalizes it, then yields one [`RawRow`] per data
//! record without buffering the whole file.

use crate::app::models::{RawRow, normalize_key};
use crate::{Error, Result};
use csv::StringRecordsIntoIter;
use std::io::Read;

/// Iterator of raw rows over a CSV byte stream
///
/// Short records are padded with empty values, cells past the last header
/// are ignored and records whose cells are all blank are skipped.
pub struct CsvRowReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    headers: Vec<String>,
    rows_read: usize,
    blank_rows_skipped: usize,
}

impl<R: Read> CsvRowReader<R> {
    /// Create a reader, consuming and normalizing the header row
    pub fn new(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::parse_with_source("CSV", e))?
            .iter()
            .map(normalize_key)
            .collect();

        Ok(Self {
            records: csv_reader.into_records(),
            headers,
            rows_read: 0,
            blank_rows_skipped: 0,
        })
    }

    /// Normalized header keys, in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rows yielded so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Number of all-blank records skipped so far
    pub fn blank_rows_skipped(&self) -> usize {
        self.blank_rows_skipped
    }

    fn build_row(&self, record: &csv::StringRecord) -> RawRow {
        let mut row = RawRow::new();
        for (index, header) in self.headers.iter().enumerate() {
            row.insert(header, record.get(index).unwrap_or(""));
        }
        row
    }
}

impl<R: Read> Iterator for CsvRowReader<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(Error::from(e))),
            };

            let row = self.build_row(&record);
            if row.is_blank() {
                self.blank_rows_skipped += 1;
                continue;
            }

            self.rows_read += 1;
            return Some(Ok(row));
        }
    }
}
