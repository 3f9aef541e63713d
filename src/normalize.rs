// src/normalize.rs
//
// Raw worksheet → typed runs.
//
// - Header names are trimmed; columns are found by exact (trimmed) name.
// - `KM` is required. `Datum`, `KW`, `Gruppe`, `Name` are optional; a missing
//   optional column switches the dependent features off.
// - Bad cells never fail the table: the field becomes `None` and the row stays.

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::consts::{COL_DATE, COL_GROUP, COL_KM, COL_NAME, COL_WEEK, DATE_FORMAT};
use crate::source::{Cell, RawTable};
use crate::week::week_label;

static EMPTY: Cell = Cell::Empty;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("column '{0}' not found in the sheet")]
    MissingColumn(&'static str),
}

/// One reported run.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// Position in the source table (0-based, header excluded).
    pub row: usize,
    /// `None` = missing/unparseable; counts as 0 in every sum.
    pub km: Option<f64>,
    pub date: Option<NaiveDate>,
    pub week: Option<u32>,
    /// Categorical form of `week` (`""` when unknown).
    pub week_label: String,
    pub group: Option<String>,
    pub name: Option<String>,
}

impl Run {
    pub fn km_or_zero(&self) -> f64 {
        self.km.unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub invalid_km: usize,
    pub invalid_dates: usize,
    pub invalid_weeks: usize,
}

#[derive(Clone, Debug)]
pub struct Normalized {
    /// Trimmed header names, same order as the raw table.
    pub headers: Vec<String>,
    pub runs: Vec<Run>,
    pub has_groups: bool,
    pub has_names: bool,
    pub has_weeks: bool,
    pub stats: NormalizeStats,
}

impl Normalized {
    pub fn total_km(&self) -> f64 {
        self.runs.iter().map(Run::km_or_zero).sum()
    }

    /// Zero rows or zero total distance: nothing worth charting.
    pub fn is_without_data(&self) -> bool {
        self.runs.is_empty() || self.total_km() == 0.0
    }
}

pub fn normalize(raw: &RawTable) -> Result<Normalized, NormalizeError> {
    let headers: Vec<String> = raw.headers.iter().map(|h| s!(h.trim())).collect();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let km_col = col(COL_KM).ok_or(NormalizeError::MissingColumn(COL_KM))?;
    let date_col = col(COL_DATE);
    let week_col = col(COL_WEEK);
    let group_col = col(COL_GROUP);
    let name_col = col(COL_NAME);

    if date_col.is_none() { logw!("Normalize: no '{}' column, dates unavailable", COL_DATE); }
    if week_col.is_none() { logw!("Normalize: no '{}' column, week charts disabled", COL_WEEK); }

    let mut stats = NormalizeStats::default();
    let mut runs = Vec::with_capacity(raw.rows.len());

    for (row, cells) in raw.rows.iter().enumerate() {
        let cell = |c: Option<usize>| c.and_then(|i| cells.get(i)).unwrap_or(&EMPTY);

        let km = parse_km(cell(Some(km_col)));
        if km.is_none() { stats.invalid_km += 1; }

        let date = date_col.and_then(|i| cells.get(i)).and_then(parse_date);
        if date_col.is_some() && date.is_none() { stats.invalid_dates += 1; }

        let week = week_col.and_then(|i| cells.get(i)).and_then(parse_week);
        if week_col.is_some() && week.is_none() { stats.invalid_weeks += 1; }

        runs.push(Run {
            row,
            km,
            date,
            week,
            week_label: week_label(week),
            group: group_col.and_then(|_| parse_label(cell(group_col))),
            name: name_col.and_then(|_| parse_label(cell(name_col))),
        });
    }

    logf!(
        "Normalize: rows={}, invalid km={}, invalid dates={}, invalid weeks={}, groups={}, names={}",
        runs.len(), stats.invalid_km, stats.invalid_dates, stats.invalid_weeks,
        group_col.is_some(), name_col.is_some()
    );

    Ok(Normalized {
        headers,
        runs,
        has_groups: group_col.is_some(),
        has_names: name_col.is_some(),
        has_weeks: week_col.is_some(),
        stats,
    })
}

/// Non-negative finite distance. Text accepts a decimal comma (`5,3`).
pub fn parse_km(cell: &Cell) -> Option<f64> {
    let v = match cell {
        Cell::Number(n) => *n,
        Cell::Text(t) => {
            let t = t.trim();
            let t = if t.contains(',') && !t.contains('.') { t.replace(',', ".") } else { s!(t) };
            t.parse::<f64>().ok()?
        }
        Cell::Empty => return None,
    };
    (v.is_finite() && v >= 0.0).then_some(v)
}

/// `day.month.year`, e.g. `03.11.2025`.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Text(t) => NaiveDate::parse_from_str(t.trim(), DATE_FORMAT).ok(),
        _ => None,
    }
}

/// Calendar week 1..=53. Integral floats (`47.0`) are accepted.
pub fn parse_week(cell: &Cell) -> Option<u32> {
    let v = match cell {
        Cell::Number(n) => *n,
        Cell::Text(t) => t.trim().parse::<f64>().ok()?,
        Cell::Empty => return None,
    };
    // ISO years with 53 weeks exist; 53 is a valid week.
    if v.fract() != 0.0 || !(1.0..=53.0).contains(&v) {
        return None;
    }
    Some(v as u32)
}

/// Trimmed label; blank cells have no label.
pub fn parse_label(cell: &Cell) -> Option<String> {
    let s = cell.to_string();
    let s = s.trim();
    (!s.is_empty()).then(|| s!(s))
}
