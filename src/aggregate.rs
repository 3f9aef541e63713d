// src/aggregate.rs
//
// Derived tables over runs. Every function takes any iterator of `&Run`, so
// the full table (`&normalized.runs`) and a filtered subset (`&filtered`,
// a `Vec<&Run>`) go through the same code.
//
// Missing distance counts as 0 in sums; row counts include those rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::normalize::Run;
use crate::week::WeekOrder;

/// One point of a group's cumulative curve.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupWeek {
    pub group: String,
    pub week_label: String,
    pub km: f64,
    pub cumulative_km: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LongestRun {
    pub km: f64,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub row: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prolific {
    /// Every runner at the maximum count, alphabetical.
    pub names: Vec<String>,
    pub runs: usize,
}

impl Prolific {
    pub fn display_names(&self) -> String {
        self.names.join(", ")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Records {
    pub longest_run: Option<LongestRun>,
    pub most_prolific: Option<Prolific>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overview {
    pub total_km: f64,
    pub run_count: usize,
    pub group_count: usize,
}

/// Distance per week label. Rows without a week are left out.
/// Ordered by `order` (challenge weeks first, then the rest ascending).
pub fn weekly_totals<'a, I>(rows: I, order: &WeekOrder) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for r in rows {
        if r.week_label.is_empty() {
            continue;
        }
        *sums.entry(r.week_label.as_str()).or_default() += r.km_or_zero();
    }

    let mut out: Vec<(String, f64)> = sums.into_iter().map(|(w, km)| (s!(w), km)).collect();
    out.sort_by(|a, b| order.cmp_labels(&a.0, &b.0));
    out
}

/// Weekly totals laid onto the full week axis of `order`; weeks without
/// entries get 0. Labels outside `order` are dropped.
pub fn reindex_weeks(totals: &[(String, f64)], order: &WeekOrder) -> Vec<(String, f64)> {
    let by_label: HashMap<&str, f64> = totals.iter().map(|(w, km)| (w.as_str(), *km)).collect();
    order
        .labels()
        .iter()
        .map(|w| (w.clone(), by_label.get(w.as_str()).copied().unwrap_or(0.0)))
        .collect()
}

/// Per-group running sum over the challenge weeks.
///
/// Only rows that have a group and whose week is part of `order` take part.
/// Sorted by group name, then canonical week position; only weeks with at
/// least one row appear.
pub fn group_weekly_cumulative<'a, I>(rows: I, order: &WeekOrder) -> Vec<GroupWeek>
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut sums: BTreeMap<(&str, usize), f64> = BTreeMap::new();
    for r in rows {
        let Some(group) = r.group.as_deref() else { continue };
        let Some(pos) = order.position(&r.week_label) else { continue };
        *sums.entry((group, pos)).or_default() += r.km_or_zero();
    }

    let mut out = Vec::with_capacity(sums.len());
    let mut current: Option<&str> = None;
    let mut running = 0.0;
    for ((group, pos), km) in sums {
        if current != Some(group) {
            current = Some(group);
            running = 0.0;
        }
        running += km;
        out.push(GroupWeek {
            group: s!(group),
            week_label: order.labels()[pos].clone(),
            km,
            cumulative_km: running,
        });
    }
    out
}

/// Distance per group for every group in `all_groups` (same order);
/// groups without matching rows are kept with 0.
pub fn group_totals<'a, I>(rows: I, all_groups: &[String]) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for r in rows {
        if let Some(g) = r.group.as_deref() {
            *sums.entry(g).or_default() += r.km_or_zero();
        }
    }
    all_groups
        .iter()
        .map(|g| (g.clone(), sums.get(g.as_str()).copied().unwrap_or(0.0)))
        .collect()
}

/// Distance per runner, descending. Equal totals stay alphabetical.
pub fn runner_totals<'a, I>(rows: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for r in rows {
        if let Some(n) = r.name.as_deref() {
            *sums.entry(n).or_default() += r.km_or_zero();
        }
    }
    let mut out: Vec<(String, f64)> = sums.into_iter().map(|(n, km)| (s!(n), km)).collect();
    sort_desc(&mut out);
    out
}

/// Stable descending sort by value.
pub fn sort_desc(totals: &mut [(String, f64)]) {
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
}

pub fn records<'a, I>(rows: I) -> Records
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut longest: Option<&Run> = None;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for r in rows {
        if let Some(km) = r.km {
            // Strictly greater: the earliest row wins a tie.
            if longest.and_then(|l| l.km).is_none_or(|best| km > best) {
                longest = Some(r);
            }
        }
        if let Some(n) = r.name.as_deref() {
            *counts.entry(n).or_default() += 1;
        }
    }

    let most_prolific = counts.values().max().copied().map(|max| Prolific {
        names: counts
            .iter()
            .filter(|&(_, &c)| c == max)
            .map(|(n, _)| s!(*n))
            .collect(),
        runs: max,
    });

    Records {
        longest_run: longest.map(|r| LongestRun {
            km: r.km_or_zero(),
            name: r.name.clone(),
            date: r.date,
            row: r.row,
        }),
        most_prolific,
    }
}

pub fn overview<'a, I>(rows: I) -> Overview
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut total_km = 0.0;
    let mut run_count = 0;
    let mut groups = BTreeSet::new();
    for r in rows {
        total_km += r.km_or_zero();
        run_count += 1;
        if let Some(g) = r.group.as_deref() {
            groups.insert(g);
        }
    }
    Overview { total_km, run_count, group_count: groups.len() }
}
