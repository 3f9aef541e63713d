// tests/aggregate.rs
mod common;

use laufchallenge::aggregate::{
    group_totals, group_weekly_cumulative, overview, records, reindex_weeks, runner_totals, weekly_totals,
};
use laufchallenge::week::WeekOrder;

use common::{example, normalized, season};

fn pairs(v: &[(&str, f64)]) -> Vec<(String, f64)> {
    v.iter().map(|(k, km)| (k.to_string(), *km)).collect()
}

#[test]
fn worked_example() {
    let n = example();
    let order = WeekOrder::challenge();

    assert_eq!(weekly_totals(&n.runs, &order), pairs(&[("45", 8.0), ("46", 2.0)]));
    assert_eq!(group_totals(&n.runs, &["X".to_string()]), pairs(&[("X", 10.0)]));
    assert_eq!(runner_totals(&n.runs), pairs(&[("A", 7.0), ("B", 3.0)]));

    let rec = records(&n.runs);
    let longest = rec.longest_run.unwrap();
    assert_eq!(longest.km, 5.0);
    assert_eq!(longest.name.as_deref(), Some("A"));

    let cum = group_weekly_cumulative(&n.runs, &order);
    let w46 = cum.iter().find(|g| g.group == "X" && g.week_label == "46").unwrap();
    assert_eq!(w46.cumulative_km, 10.0);
}

#[test]
fn invalid_distance_counts_as_a_run() {
    let n = normalized(&[("A", "X", "abc", "47"), ("A", "X", "2", "47"), ("B", "X", "9", "47")]);
    let order = WeekOrder::challenge();

    assert_eq!(weekly_totals(&n.runs, &order), pairs(&[("47", 11.0)]));
    assert_eq!(overview(&n.runs).run_count, 3);

    let prolific = records(&n.runs).most_prolific.unwrap();
    assert_eq!(prolific.names, vec!["A"]);
    assert_eq!(prolific.runs, 2);
}

#[test]
fn week_one_follows_week_46() {
    let n = normalized(&[("A", "X", "4", "1"), ("A", "X", "6", "46")]);
    let cum = group_weekly_cumulative(&n.runs, &WeekOrder::challenge());

    let labels: Vec<&str> = cum.iter().map(|g| g.week_label.as_str()).collect();
    assert_eq!(labels, vec!["46", "1"]);
    assert_eq!(cum[0].cumulative_km, 6.0);
    assert_eq!(cum[1].cumulative_km, 10.0);
}

#[test]
fn weekly_and_cumulative_conserve_distance() {
    let n = season();
    let order = WeekOrder::challenge();

    let weekly: f64 = weekly_totals(&n.runs, &order).iter().map(|(_, km)| km).sum();
    let per_group_week: f64 = group_weekly_cumulative(&n.runs, &order).iter().map(|g| g.km).sum();
    assert!((weekly - per_group_week).abs() < 1e-9);
    assert!((weekly - n.total_km()).abs() < 1e-9);
}

#[test]
fn cumulative_is_monotone_and_ends_at_group_total() {
    let n = season();
    let order = WeekOrder::challenge();
    let cum = group_weekly_cumulative(&n.runs, &order);
    let groups = vec!["Blitz".to_string(), "Donner".to_string()];

    for (group, total) in group_totals(&n.runs, &groups) {
        let series: Vec<_> = cum.iter().filter(|g| g.group == group).collect();
        assert!(series.windows(2).all(|w| w[0].cumulative_km <= w[1].cumulative_km));
        assert!(series
            .windows(2)
            .all(|w| order.position(&w[0].week_label) < order.position(&w[1].week_label)));
        assert_eq!(series.last().unwrap().cumulative_km, total);
    }
}

#[test]
fn outside_weeks_stay_in_weekly_totals_only() {
    let n = normalized(&[("A", "X", "3", "20"), ("A", "X", "5", "45"), ("A", "X", "1", "11")]);
    let order = WeekOrder::challenge();

    let weekly = weekly_totals(&n.runs, &order);
    assert_eq!(weekly, pairs(&[("45", 5.0), ("11", 1.0), ("20", 3.0)]));

    let cum = group_weekly_cumulative(&n.runs, &order);
    assert_eq!(cum.len(), 1);
    assert_eq!(cum[0].cumulative_km, 5.0);

    let axis = reindex_weeks(&weekly, &order);
    assert_eq!(axis.len(), order.len());
    assert_eq!(axis[0], ("45".to_string(), 5.0));
    assert!(axis.iter().all(|(w, _)| w != "20"));
}

#[test]
fn group_totals_fill_missing_groups() {
    let n = normalized(&[("A", "X", "5", "45")]);
    let all = vec!["X".to_string(), "Y".to_string()];
    assert_eq!(group_totals(&n.runs, &all), pairs(&[("X", 5.0), ("Y", 0.0)]));
}

#[test]
fn most_prolific_keeps_every_tie() {
    let n = normalized(&[
        ("Cem", "X", "1", "45"),
        ("Anna", "X", "1", "45"),
        ("Cem", "X", "1", "46"),
        ("Anna", "X", "1", "46"),
        ("Ben", "X", "30", "46"),
    ]);
    let p = records(&n.runs).most_prolific.unwrap();
    assert_eq!(p.names, vec!["Anna", "Cem"]);
    assert_eq!(p.display_names(), "Anna, Cem");
    assert_eq!(p.runs, 2);
}

#[test]
fn runner_totals_are_descending_and_stable() {
    let n = normalized(&[("Ben", "X", "5", "45"), ("Anna", "X", "5", "45"), ("Cem", "X", "9", "45")]);
    assert_eq!(runner_totals(&n.runs), pairs(&[("Cem", 9.0), ("Anna", 5.0), ("Ben", 5.0)]));
}

#[test]
fn overview_counts() {
    let o = overview(&season().runs);
    assert_eq!(o.run_count, 9);
    assert_eq!(o.group_count, 2);
    assert!((o.total_km - 55.5).abs() < 1e-9);
}
