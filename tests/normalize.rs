// tests/normalize.rs
mod common;

use chrono::NaiveDate;
use laufchallenge::normalize::{NormalizeError, normalize, parse_km, parse_week};
use laufchallenge::source::{Cell, RawTable};

use common::{HEADERS, table};

#[test]
fn header_names_are_trimmed() {
    let raw = table(&[" Datum", "KW ", " Gruppe ", "Name", "  KM  "], &[&["03.11.2025", "45", "X", "A", "5"]]);
    let n = normalize(&raw).unwrap();
    assert_eq!(n.headers, vec!["Datum", "KW", "Gruppe", "Name", "KM"]);
    assert_eq!(n.runs[0].km, Some(5.0));
    assert!(n.has_groups && n.has_names && n.has_weeks);
}

#[test]
fn missing_distance_column_is_fatal() {
    let raw = table(&["Datum", "Name"], &[&["03.11.2025", "A"]]);
    assert_eq!(normalize(&raw).unwrap_err(), NormalizeError::MissingColumn("KM"));
}

#[test]
fn unparseable_distance_keeps_the_row() {
    let raw = table(&HEADERS, &[
        &["03.11.2025", "47", "X", "A", "abc"],
        &["04.11.2025", "47", "X", "A", "4"],
    ]);
    let n = normalize(&raw).unwrap();
    assert_eq!(n.runs.len(), 2);
    assert_eq!(n.runs[0].km, None);
    assert_eq!(n.runs[0].week, Some(47));
    assert_eq!(n.stats.invalid_km, 1);
    assert_eq!(n.total_km(), 4.0);
}

#[test]
fn dates_use_day_month_year() {
    let raw = table(&HEADERS, &[
        &["03.11.2025", "45", "X", "A", "5"],
        &["2025-11-03", "45", "X", "A", "5"],
    ]);
    let n = normalize(&raw).unwrap();
    assert_eq!(n.runs[0].date, NaiveDate::from_ymd_opt(2025, 11, 3));
    assert_eq!(n.runs[1].date, None);
    assert_eq!(n.stats.invalid_dates, 1);
    // distance is still attributed
    assert_eq!(n.total_km(), 10.0);
}

#[test]
fn week_labels() {
    let raw = table(&HEADERS, &[
        &["03.11.2025", "45", "X", "A", "1"],
        &["03.11.2025", "KW1", "X", "A", "1"],
        &["03.11.2025", "", "X", "A", "1"],
    ]);
    let n = normalize(&raw).unwrap();
    assert_eq!(n.runs[0].week_label, "45");
    assert_eq!(n.runs[1].week, None);
    assert_eq!(n.runs[1].week_label, "");
    assert_eq!(n.runs[2].week_label, "");
    assert_eq!(n.stats.invalid_weeks, 2);
}

#[test]
fn cell_parsers() {
    assert_eq!(parse_km(&Cell::Number(7.5)), Some(7.5));
    assert_eq!(parse_km(&Cell::Text("5,3".into())), Some(5.3));
    assert_eq!(parse_km(&Cell::Text(" 12.25 ".into())), Some(12.25));
    assert_eq!(parse_km(&Cell::Text("-3".into())), None);
    assert_eq!(parse_km(&Cell::Text("1,234.5".into())), None);
    assert_eq!(parse_km(&Cell::Empty), None);

    assert_eq!(parse_week(&Cell::Number(47.0)), Some(47));
    assert_eq!(parse_week(&Cell::Number(47.5)), None);
    assert_eq!(parse_week(&Cell::Text("0".into())), None);
    assert_eq!(parse_week(&Cell::Text("54".into())), None);
    assert_eq!(parse_week(&Cell::Text("53".into())), Some(53));
}

#[test]
fn blank_labels_are_none() {
    let raw = table(&HEADERS, &[&["03.11.2025", "45", "  ", " Anna ", "5"]]);
    let n = normalize(&raw).unwrap();
    assert_eq!(n.runs[0].group, None);
    assert_eq!(n.runs[0].name.as_deref(), Some("Anna"));
}

#[test]
fn optional_columns_switch_features_off() {
    let raw = table(&["KM", "KW"], &[&["5", "45"]]);
    let n = normalize(&raw).unwrap();
    assert!(!n.has_groups);
    assert!(!n.has_names);
    assert!(n.has_weeks);
    assert_eq!(n.runs[0].group, None);
}

#[test]
fn empty_or_zero_tables_have_no_data() {
    let empty = normalize(&table(&HEADERS, &[])).unwrap();
    assert!(empty.is_without_data());

    let zero = normalize(&table(&HEADERS, &[&["03.11.2025", "45", "X", "A", "abc"]])).unwrap();
    assert!(zero.is_without_data());

    let headerless = normalize(&RawTable::default());
    assert!(headerless.is_err());
}
