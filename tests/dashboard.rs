// tests/dashboard.rs
mod common;

use laufchallenge::dashboard::{Dashboard, NO_NAME_NOTICE, Outcome, ViewModel, filter_label, render};
use laufchallenge::filter::{Choice, Selection, WeekChoice};
use laufchallenge::source::RawTable;
use laufchallenge::view::color::{self, MUTED, PRIMARY};
use laufchallenge::view::{Leaderboard, LineStyle, Plot};

use common::{HEADERS, runs, table};

fn ready(raw: &RawTable) -> Box<Dashboard> {
    match Dashboard::from_raw(raw, None).unwrap() {
        Outcome::Ready(d) => d,
        Outcome::NoData { .. } => panic!("expected data"),
    }
}

fn season_raw() -> RawTable {
    runs(&[
        ("Anna", "Blitz", "10", "45"),
        ("Ben", "Blitz", "5.5", "46"),
        ("Anna", "Blitz", "7", "1"),
        ("Cem", "Donner", "12", "46"),
        ("Dora", "Donner", "3", "52"),
        ("Cem", "Donner", "4", "2"),
        ("Finn", "Blitz", "8", "10"),
    ])
}

fn only(s: &str) -> Choice {
    Choice::Only(s.to_string())
}

fn bars(vm: &Option<laufchallenge::view::ChartSpec>) -> Vec<(String, f64, color::Rgb)> {
    let spec = vm.as_ref().unwrap();
    match &spec.plot {
        Plot::Bars(b) => spec.categories.iter().cloned().zip(b).map(|(c, b)| (c, b.value, b.color)).collect(),
        Plot::Lines(_) => panic!("expected bars"),
    }
}

#[test]
fn empty_and_zero_tables_yield_no_data() {
    let empty = table(&HEADERS, &[]);
    assert!(matches!(Dashboard::from_raw(&empty, None).unwrap(), Outcome::NoData { .. }));

    let zero = runs(&[("A", "X", "0", "45"), ("B", "X", "", "45")]);
    assert!(matches!(Dashboard::from_raw(&zero, None).unwrap(), Outcome::NoData { .. }));
}

#[test]
fn missing_distance_column_is_an_error() {
    let raw = table(&["Name"], &[&["A"]]);
    assert!(Dashboard::from_raw(&raw, None).is_err());
}

#[test]
fn unselected_view() {
    let d = ready(&season_raw());
    let vm: ViewModel = render(&d, &Selection::default());

    assert_eq!(vm.period, "Gesamt");
    assert_eq!(vm.filter_label, "alle Läufer");
    assert_eq!(vm.metrics.len(), 3);
    assert_eq!(vm.metrics[0].value, "49.5 km");
    assert_eq!(vm.metrics[1].value, "7");
    assert_eq!(vm.detail.rows.len(), 7);
    assert!(vm.notices.is_empty());

    // group bars: sorted descending, palette colours, nothing emphasised
    let g = bars(&vm.group_bars);
    assert_eq!(g[0].0, "Blitz");
    assert_eq!(g[0].1, 30.5);
    assert_eq!(g[0].2, color::palette(0));
    assert_eq!(g[1].2, color::palette(1));

    // weekly chart always spans the challenge weeks, zero-filled
    let weekly = vm.weekly.as_ref().unwrap();
    assert_eq!(weekly.categories.len(), 18);
    assert_eq!(weekly.categories[0], "45");
    assert_eq!(weekly.categories[8], "1");
    assert!(weekly.title.contains("alle Läufer"));
    let b = bars(&vm.weekly);
    assert_eq!(b[2].1, 0.0); // week 47
    assert_eq!(b[1].1, 17.5); // week 46
}

#[test]
fn selected_group_is_emphasised() {
    let d = ready(&season_raw());
    let vm = render(&d, &Selection { group: only("Donner"), ..Default::default() });

    for (label, _, c) in bars(&vm.group_bars) {
        assert_eq!(c, if label == "Donner" { PRIMARY } else { MUTED });
    }
    // group comparison ignores the group filter itself
    assert_eq!(bars(&vm.group_bars).len(), 2);

    // runner bars are restricted to the group
    let runners: Vec<String> = bars(&vm.runner_bars).into_iter().map(|b| b.0).collect();
    assert_eq!(runners, vec!["Cem", "Dora"]);

    let cum = vm.cumulative.as_ref().unwrap();
    let Plot::Lines(lines) = &cum.plot else { panic!("expected lines") };
    for l in lines {
        let want = if l.name == "Donner" { LineStyle::SELECTED } else { LineStyle::MUTED };
        assert_eq!(l.style, want);
    }
    assert!(vm.filter_label.starts_with("Gruppe: Donner"));
}

#[test]
fn cumulative_axis_and_gaps() {
    let d = ready(&season_raw());
    let vm = render(&d, &Selection::default());
    let cum = vm.cumulative.as_ref().unwrap();
    let Plot::Lines(lines) = &cum.plot else { panic!("expected lines") };

    let blitz = lines.iter().find(|l| l.name == "Blitz").unwrap();
    assert_eq!(blitz.points.len(), 18);
    assert_eq!(blitz.points[0], Some(10.0)); // 45
    assert_eq!(blitz.points[1], Some(15.5)); // 46
    assert_eq!(blitz.points[2], None); // 47
    assert_eq!(blitz.points[8], Some(22.5)); // 1
    assert_eq!(blitz.points[17], Some(30.5)); // 10
    assert!(!blitz.style.dashed);
}

#[test]
fn week_selection_scopes_rankings() {
    let d = ready(&season_raw());
    let vm = render(&d, &Selection { week: WeekChoice::Week(46), ..Default::default() });

    assert_eq!(vm.period, "46");
    let team = vm.team_board.as_ref().unwrap();
    assert_eq!(team.rows.len(), 2);
    assert_eq!(team.rows[0].label, "Donner");
    assert_eq!(team.scale, 12.0);
    assert_eq!(team.rows[1].fraction, 5.5 / 12.0);
    assert!(team.title.contains("(46)"));

    // group bars filter by week only, every group listed
    let g = bars(&vm.group_bars);
    assert_eq!(g.len(), 2);
    assert_eq!(vm.detail.rows.len(), 2);
}

#[test]
fn runner_board_is_top_ten() {
    let names: Vec<String> = (0..14).map(|i| format!("R{i:02}")).collect();
    let rows: Vec<(&str, &str, String, &str)> =
        names.iter().enumerate().map(|(i, n)| (n.as_str(), "X", format!("{}", i + 1), "45")).collect();
    let rows: Vec<(&str, &str, &str, &str)> = rows.iter().map(|(a, b, c, d)| (*a, *b, c.as_str(), *d)).collect();
    let d = ready(&runs(&rows));

    let vm = render(&d, &Selection::default());
    let board = vm.runner_board.as_ref().unwrap();
    assert_eq!(board.rows.len(), 10);
    assert_eq!(board.rows[0].label, "R13");
    assert_eq!(board.rows[0].rank, 1);
    assert_eq!(board.rows[9].rank, 10);
    assert_eq!(board.scale, 14.0);
    assert_eq!(board.rows[0].fraction, 1.0);

    // team board is never truncated
    assert_eq!(vm.team_board.as_ref().unwrap().rows.len(), 1);
}

#[test]
fn empty_leaderboard_scale() {
    let b = Leaderboard::build("t".into(), "Name", Vec::new(), Some(10));
    assert!(b.is_empty());
    assert_eq!(b.scale, 100.0);
}

#[test]
fn stale_selection_is_reset() {
    let d = ready(&season_raw());
    let vm = render(&d, &Selection { group: only("Gibtsnicht"), runner: only("Anna"), week: WeekChoice::Week(30) });
    assert_eq!(vm.selection.group, Choice::All);
    assert_eq!(vm.selection.runner, only("Anna"));
    assert_eq!(vm.selection.week, WeekChoice::Total);
    assert_eq!(vm.filter_label, "Name: Anna");
}

#[test]
fn without_names_runner_views_are_skipped() {
    let raw = table(&["KW", "Gruppe", "KM"], &[&["45", "X", "5"], &["46", "Y", "2"]]);
    let d = ready(&raw);
    let vm = render(&d, &Selection::default());
    assert!(vm.runner_bars.is_none());
    assert!(vm.runner_board.is_none());
    assert!(vm.records.is_none());
    assert!(vm.notices.iter().any(|n| n == NO_NAME_NOTICE));
    assert!(vm.group_bars.is_some());
    assert!(vm.has_groups && vm.has_weeks);
    assert!(!vm.has_names);
}

#[test]
fn selectors_follow_present_columns() {
    let vm = render(&ready(&season_raw()), &Selection::default());
    assert!(vm.has_groups && vm.has_names && vm.has_weeks);

    let km_only = table(&["Name", "KM"], &[&["A", "5"]]);
    let vm = render(&ready(&km_only), &Selection::default());
    assert!(vm.has_names);
    assert!(!vm.has_groups);
    assert!(!vm.has_weeks);
}

#[test]
fn records_panel() {
    let d = ready(&season_raw());
    let vm = render(&d, &Selection::default());
    let rec = vm.records.as_ref().unwrap();
    assert_eq!(rec[0].value, "12.0 km");
    assert_eq!(rec[0].caption.as_deref(), Some("Rekordhalter: Cem (03.11.)"));
    assert_eq!(rec[1].value, "2 Läufe");
    assert_eq!(rec[1].caption.as_deref(), Some("Rekordhalter: Anna, Cem"));
}

#[test]
fn filter_label_prefers_runner() {
    let sel = Selection { group: only("X"), runner: only("A"), ..Default::default() };
    assert_eq!(filter_label(&sel), "Name: A");
}
