// src/source/csv_file.rs
//
// Local file source: a CSV/TSV download of the running-log sheet.
// Same contract as the Google source; every cell arrives as text.

use std::fs;
use std::path::PathBuf;

use super::{Cell, RawTable, SheetSource, SourceError};
use crate::csv::{parse_rows, sniff_delim};

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SheetSource for CsvSource {
    fn fetch(&self) -> Result<RawTable, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::File {
            path: self.path.clone(),
            source,
        })?;

        let grid = parse_rows(&text, sniff_delim(&text))
            .into_iter()
            .map(|row| row.iter().map(|c| Cell::from_text(c)).collect())
            .collect();

        let table = RawTable::from_grid(grid);
        logf!("Fetch: {} → rows={}", self.describe(), table.row_count());
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("csv {}", self.path.display())
    }
}
