// src/filter.rs
//
// Group / runner / week selection and the cascading option lists.
//
// - Concrete choices restrict by exact equality; `All` / `Total` restrict nothing.
// - The three dimensions are ANDed and independent of evaluation order.
// - Option lists cascade: groups from the full table, runners from the
//   group-filtered rows, weeks from the group+runner-filtered rows.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::consts::{ALL_LABEL, TOTAL_LABEL};
use crate::normalize::Run;
use crate::week::WeekOrder;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(want) => value == Some(want.as_str()),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL_LABEL),
            Choice::Only(v) => f.write_str(v),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeekChoice {
    #[default]
    Total,
    Week(u32),
}

impl WeekChoice {
    pub fn matches(&self, week: Option<u32>) -> bool {
        match self {
            WeekChoice::Total => true,
            WeekChoice::Week(w) => week == Some(*w),
        }
    }
}

impl fmt::Display for WeekChoice {
    /// Also the period label used in titles: `Gesamt` or the week number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekChoice::Total => f.write_str(TOTAL_LABEL),
            WeekChoice::Week(w) => write!(f, "{w}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub group: Choice,
    pub runner: Choice,
    pub week: WeekChoice,
}

impl Selection {
    pub fn matches(&self, run: &Run) -> bool {
        self.group.matches(run.group.as_deref())
            && self.runner.matches(run.name.as_deref())
            && self.week.matches(run.week)
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == Selection::default()
    }

    /// Only the week restriction (group comparison chart).
    pub fn week_only(&self) -> Selection {
        Selection { week: self.week, ..Selection::default() }
    }

    /// Group and week, any runner (runner comparison chart).
    pub fn without_runner(&self) -> Selection {
        Selection { runner: Choice::All, ..self.clone() }
    }

    /// Group and runner, all weeks (weekly development chart).
    pub fn without_week(&self) -> Selection {
        Selection { week: WeekChoice::Total, ..self.clone() }
    }

    /// Reset every choice that is no longer offered, walking the cascade
    /// top-down so a reset group also re-derives the runner list.
    /// Returns the option lists for the reconciled selection.
    pub fn reconcile(&mut self, rows: &[Run], order: &WeekOrder) -> SelectorOptions {
        let groups = group_options(rows);
        if !groups.contains(&self.group) {
            logd!("Filter: group '{}' no longer offered, reset", self.group);
            self.group = Choice::All;
        }

        let runners = runner_options(rows, &self.group);
        if !runners.contains(&self.runner) {
            logd!("Filter: runner '{}' no longer offered, reset", self.runner);
            self.runner = Choice::All;
        }

        let weeks = week_options(rows, &self.group, &self.runner, order);
        if !weeks.contains(&self.week) {
            logd!("Filter: week '{}' no longer offered, reset", self.week);
            self.week = WeekChoice::Total;
        }

        SelectorOptions { groups, runners, weeks }
    }
}

/// Rows matching `sel`, in their original order.
pub fn apply_filters<'a>(rows: &'a [Run], sel: &Selection) -> Vec<&'a Run> {
    rows.iter().filter(|r| sel.matches(r)).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorOptions {
    pub groups: Vec<Choice>,
    pub runners: Vec<Choice>,
    pub weeks: Vec<WeekChoice>,
}

impl SelectorOptions {
    /// Option lists for `sel` as-is (no reset).
    pub fn compute(rows: &[Run], sel: &Selection, order: &WeekOrder) -> Self {
        Self {
            groups: group_options(rows),
            runners: runner_options(rows, &sel.group),
            weeks: week_options(rows, &sel.group, &sel.runner, order),
        }
    }
}

fn group_options(rows: &[Run]) -> Vec<Choice> {
    with_all(distinct(rows.iter().filter_map(|r| r.group.as_deref())))
}

fn runner_options(rows: &[Run], group: &Choice) -> Vec<Choice> {
    with_all(distinct(
        rows.iter()
            .filter(|r| group.matches(r.group.as_deref()))
            .filter_map(|r| r.name.as_deref()),
    ))
}

fn week_options(rows: &[Run], group: &Choice, runner: &Choice, order: &WeekOrder) -> Vec<WeekChoice> {
    let mut weeks: Vec<u32> = rows
        .iter()
        .filter(|r| group.matches(r.group.as_deref()) && runner.matches(r.name.as_deref()))
        .filter_map(|r| r.week)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    weeks.sort_by(|a, b| order.cmp_weeks(*a, *b));

    std::iter::once(WeekChoice::Total)
        .chain(weeks.into_iter().map(WeekChoice::Week))
        .collect()
}

/// Sorted distinct labels.
pub fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values.collect::<BTreeSet<_>>().into_iter().map(String::from).collect()
}

fn with_all(values: Vec<String>) -> Vec<Choice> {
    std::iter::once(Choice::All)
        .chain(values.into_iter().map(Choice::Only))
        .collect()
}
