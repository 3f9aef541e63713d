//! # Data source adapters
//!
//! Everything that knows *where* the running log lives. A source returns the
//! worksheet verbatim as a [`RawTable`]: header names exactly as typed in the
//! first row, cells untyped. Trimming, parsing and validation happen later in
//! [`crate::normalize`].
//!
//! ## Implementations
//! - [`google::GoogleSheetSource`] – Sheets API v4 with a service account.
//! - [`csv_file::CsvSource`] – a local CSV/TSV download of the same sheet.
//!
//! [`cache::FetchCache`] wraps either one and keeps the last table for the
//! configured TTL.
//!
//! ## Failure policy
//! Every [`SourceError`] is fatal for the render that triggered it. Callers
//! show the message and stop; there is no partial dashboard.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::config::options::{SourceKind, SourceOptions};
use crate::core::net::HttpError;

pub mod cache;
pub mod credentials;
pub mod csv_file;
pub mod google;

pub use cache::FetchCache;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(
        "no service-account credentials found; pass --credentials <file> or set LAUFCHALLENGE_CREDENTIALS"
    )]
    MissingCredentials,
    #[error("cannot read credentials {path}: {reason}")]
    Credentials { path: PathBuf, reason: String },
    #[error("authorization failed: {0}")]
    Auth(String),
    #[error("network error: {0}")]
    Http(#[from] HttpError),
    #[error("spreadsheet {sheet_id} not found or not shared with the service account")]
    SheetNotFound { sheet_id: String },
    #[error("worksheet '{worksheet}' not found in the spreadsheet")]
    WorksheetNotFound { worksheet: String },
    #[error("sheets API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Malformed(String),
    #[error("cannot read {path}: {source}")]
    File { path: PathBuf, source: io::Error },
}

/// One untyped spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Blank text becomes `Empty`; everything else stays text.
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() { Cell::Empty } else { Cell::Text(s!(s)) }
    }

    /// Sheets API `values` entry (UNFORMATTED_VALUE render option).
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => Cell::Empty,
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::from_text(s),
            Value::Bool(b) => Cell::Text(b.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Worksheet as fetched: verbatim headers + rows of cells.
/// Every row has exactly `headers.len()` cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// First row is the header. Short rows are padded, long rows cut, and
    /// rows without a single non-empty cell are dropped.
    pub fn from_grid(mut grid: Vec<Vec<Cell>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let headers: Vec<String> = grid.remove(0).iter().map(|c| c.to_string()).collect();
        let width = headers.len();

        let rows = grid
            .into_iter()
            .filter(|r| r.iter().any(|c| !c.is_empty()))
            .map(|mut r| {
                r.resize(width, Cell::Empty);
                r
            })
            .collect();

        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells rendered back to text, for the detail table and export.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }
}

/// Anything that can produce the running log.
pub trait SheetSource {
    fn fetch(&self) -> Result<RawTable, SourceError>;

    /// Human label for logs and status lines.
    fn describe(&self) -> String;
}

/// Build the configured source. A Google source without credentials is a
/// startup error.
pub fn from_options(opts: &SourceOptions) -> Result<Box<dyn SheetSource>, SourceError> {
    match &opts.kind {
        SourceKind::Sheet { sheet_id, worksheet } => {
            let path = opts.credentials_path().ok_or(SourceError::MissingCredentials)?;
            let account = credentials::ServiceAccount::load(&path)?;
            logf!("Source: service account {} ({})", account.client_email, path.display());
            Ok(Box::new(google::GoogleSheetSource::new(account, sheet_id, worksheet)))
        }
        SourceKind::Csv(path) => Ok(Box::new(csv_file::CsvSource::new(path.clone()))),
    }
}
