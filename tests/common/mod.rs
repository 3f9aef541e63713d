// tests/common/mod.rs
//
// Small table builders shared by the integration tests.
#![allow(dead_code)]

use laufchallenge::normalize::{Normalized, normalize};
use laufchallenge::source::{Cell, RawTable};

pub const HEADERS: [&str; 5] = ["Datum", "KW", "Gruppe", "Name", "KM"];

/// Text-only table, the way a CSV download arrives.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    let mut grid: Vec<Vec<Cell>> = vec![headers.iter().map(|h| Cell::Text(h.to_string())).collect()];
    grid.extend(rows.iter().map(|r| r.iter().map(|c| Cell::from_text(c)).collect()));
    RawTable::from_grid(grid)
}

/// `(name, group, km, week)` rows with a date derived from nothing in particular.
pub fn runs(rows: &[(&str, &str, &str, &str)]) -> RawTable {
    let owned: Vec<[String; 5]> = rows
        .iter()
        .map(|(name, group, km, week)| {
            [s("03.11.2025"), s(week), s(group), s(name), s(km)]
        })
        .collect();
    let refs: Vec<Vec<&str>> = owned.iter().map(|r| r.iter().map(String::as_str).collect()).collect();
    let slices: Vec<&[&str]> = refs.iter().map(Vec::as_slice).collect();
    table(&HEADERS, &slices)
}

pub fn normalized(rows: &[(&str, &str, &str, &str)]) -> Normalized {
    normalize(&runs(rows)).unwrap()
}

/// The three-row example: A/X 5 km w45, B/X 3 km w45, A/X 2 km w46.
pub fn example() -> Normalized {
    normalized(&[("A", "X", "5", "45"), ("B", "X", "3", "45"), ("A", "X", "2", "46")])
}

/// Two groups, six runners, weeks across the year end.
pub fn season() -> Normalized {
    normalized(&[
        ("Anna", "Blitz", "10", "45"),
        ("Ben", "Blitz", "5.5", "46"),
        ("Anna", "Blitz", "7", "1"),
        ("Cem", "Donner", "12", "46"),
        ("Dora", "Donner", "3", "52"),
        ("Cem", "Donner", "4", "2"),
        ("Eva", "Donner", "abc", "47"),
        ("Finn", "Blitz", "8", "10"),
        ("Ben", "Blitz", "6", "1"),
    ])
}

fn s(v: &str) -> String {
    v.to_string()
}
