// src/dashboard.rs
//
// Table → dashboard. Two stages:
//
//   Dashboard::from_raw  once per fetched table: normalise, static aggregates
//   render               once per selection change: pure, no I/O
//
// The GUI and the CLI both draw the `ViewModel` that `render` returns and
// never aggregate on their own.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::aggregate::{self, GroupWeek, Overview, Records};
use crate::config::consts::{RUNNER_LEADERBOARD_SIZE, TIMESTAMP_FORMAT};
use crate::filter::{self, Selection, SelectorOptions, apply_filters};
use crate::normalize::{NormalizeError, Normalized, Run, normalize};
use crate::source::cache::CachedTable;
use crate::source::{FetchCache, RawTable, SourceError};
use crate::view::chart::{self, ChartSpec};
use crate::view::Leaderboard;
use crate::week::WeekOrder;

pub const NO_DATA_NOTICE: &str =
    "Noch keine Daten vorhanden: die Tabelle ist leer oder enthält noch keine Kilometer.";
pub const NO_NAME_NOTICE: &str = "Die Daten enthalten keine 'Name'-Spalte für diesen Vergleich.";
pub const NO_WEEK_NOTICE: &str = "Die Daten enthalten keine 'KW'-Spalte für die Wochenübersicht.";

/// Anything that stops the dashboard from rendering at all.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

#[derive(Debug)]
pub enum Outcome {
    Ready(Box<Dashboard>),
    /// Zero rows or zero kilometres: show the notice instead of charts.
    NoData { loaded_at: Option<DateTime<Local>> },
}

/// A fetched, normalised table plus everything that does not depend on the
/// selection.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub data: Normalized,
    /// Original cells as text, indexed by `Run::row`.
    pub cells: Vec<Vec<String>>,
    pub order: WeekOrder,
    pub loaded_at: Option<DateTime<Local>>,

    pub weekly_summary: Vec<(String, f64)>,
    pub group_weekly: Vec<GroupWeek>,
    pub all_groups: Vec<String>,
    pub overview: Overview,
    pub records: Records,
}

impl Dashboard {
    pub fn from_raw(raw: &RawTable, loaded_at: Option<DateTime<Local>>) -> Result<Outcome, NormalizeError> {
        let data = normalize(raw)?;
        if data.is_without_data() {
            logw!("Dashboard: no data (rows={}, km={:.1})", data.runs.len(), data.total_km());
            return Ok(Outcome::NoData { loaded_at });
        }

        let order = WeekOrder::challenge();
        let runs = &data.runs;
        let dashboard = Dashboard {
            cells: raw.text_rows(),
            weekly_summary: aggregate::weekly_totals(runs, &order),
            group_weekly: if data.has_groups {
                aggregate::group_weekly_cumulative(runs, &order)
            } else {
                Vec::new()
            },
            all_groups: filter::distinct(runs.iter().filter_map(|r| r.group.as_deref())),
            overview: aggregate::overview(runs),
            records: aggregate::records(runs),
            order,
            loaded_at,
            data,
        };

        logf!(
            "Dashboard: ready (runs={}, km={:.1}, groups={})",
            dashboard.overview.run_count, dashboard.overview.total_km, dashboard.all_groups.len()
        );
        Ok(Outcome::Ready(Box::new(dashboard)))
    }

    pub fn from_cached(cached: &CachedTable) -> Result<Outcome, NormalizeError> {
        Self::from_raw(&cached.table, Some(cached.loaded_at))
    }

    pub fn runs(&self) -> &[Run] {
        &self.data.runs
    }
}

/// Cached (or freshly fetched) table → outcome.
pub fn load(cache: &mut FetchCache) -> Result<Outcome, DashboardError> {
    let cached = cache.get()?;
    Ok(Dashboard::from_cached(cached)?)
}

/// Bypass the TTL and fetch again.
pub fn reload(cache: &mut FetchCache) -> Result<Outcome, DashboardError> {
    let cached = cache.force_refresh()?;
    Ok(Dashboard::from_cached(cached)?)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub caption: Option<String>,
    pub help: String,
}

/// Filtered rows with their original columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Group of each row, same order as `rows` (per-group export).
    pub groups: Vec<Option<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    /// The selection actually rendered (stale choices reset).
    pub selection: Selection,
    pub options: SelectorOptions,
    /// `Gesamt` or the selected week.
    pub period: String,
    /// `alle Läufer`, `Gruppe: X` or `Name: Y`.
    pub filter_label: String,
    pub loaded_at: Option<String>,
    /// Which selectors to offer; a selector needs its column.
    pub has_groups: bool,
    pub has_names: bool,
    pub has_weeks: bool,

    pub metrics: Vec<Metric>,
    /// `None` without a name column.
    pub records: Option<Vec<Metric>>,
    pub group_bars: Option<ChartSpec>,
    pub runner_bars: Option<ChartSpec>,
    pub team_board: Option<Leaderboard>,
    pub runner_board: Option<Leaderboard>,
    pub weekly: Option<ChartSpec>,
    pub cumulative: Option<ChartSpec>,
    pub detail: DetailTable,
    /// Informational lines for features that are switched off.
    pub notices: Vec<String>,
}

pub fn period_label(sel: &Selection) -> String {
    sel.week.to_string()
}

pub fn filter_label(sel: &Selection) -> String {
    match (sel.group.selected(), sel.runner.selected()) {
        (_, Some(name)) => format!("Name: {name}"),
        (Some(group), None) => format!("Gruppe: {group}"),
        (None, None) => s!("alle Läufer"),
    }
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// One render pass for `selection`.
pub fn render(d: &Dashboard, selection: &Selection) -> ViewModel {
    let runs = d.runs();
    let mut sel = selection.clone();
    let options = sel.reconcile(runs, &d.order);

    let period = period_label(&sel);
    let filter_label = filter_label(&sel);
    let filtered = apply_filters(runs, &sel);
    let mut notices = Vec::new();

    let group_bars = d.data.has_groups.then(|| {
        let in_week = apply_filters(runs, &sel.week_only());
        let mut totals = aggregate::group_totals(in_week, &d.all_groups);
        aggregate::sort_desc(&mut totals);
        chart::comparison_bars(
            format!("Gesamt-KM der Gruppen ({period})"),
            "Gruppe",
            "Kilometer",
            &totals,
            sel.group.selected(),
        )
    });

    let runner_bars = if d.data.has_names {
        let scoped = apply_filters(runs, &sel.without_runner());
        Some(chart::comparison_bars(
            format!("Einzelwertungen ({period})"),
            "Name",
            "Gesamt-KM",
            &aggregate::runner_totals(scoped),
            sel.runner.selected(),
        ))
    } else {
        notices.push(s!(NO_NAME_NOTICE));
        None
    };

    let team_board = d.data.has_groups.then(|| {
        let present = filter::distinct(filtered.iter().filter_map(|r| r.group.as_deref()));
        Leaderboard::build(
            format!("Team-Bestenliste ({period})"),
            "Gruppe",
            aggregate::group_totals(filtered.iter().copied(), &present),
            None,
        )
    });

    let runner_board = d.data.has_names.then(|| {
        Leaderboard::build(
            format!("Top {RUNNER_LEADERBOARD_SIZE} Name-Bestenliste ({period})"),
            "Name",
            aggregate::runner_totals(filtered.iter().copied()),
            Some(RUNNER_LEADERBOARD_SIZE),
        )
    });

    let weekly = if d.data.has_weeks {
        let totals = if sel.group == filter::Choice::All && sel.runner == filter::Choice::All {
            d.weekly_summary.clone()
        } else {
            aggregate::weekly_totals(apply_filters(runs, &sel.without_week()), &d.order)
        };
        Some(chart::week_bars(
            format!("Gesamt-KM pro Kalenderwoche für {filter_label} (Gesamtübersicht)"),
            &aggregate::reindex_weeks(&totals, &d.order),
        ))
    } else {
        notices.push(s!(NO_WEEK_NOTICE));
        None
    };

    let cumulative = (!d.group_weekly.is_empty()).then(|| {
        chart::cumulative_lines(
            s!("Kumulierte Gruppen-KM nach Kalenderwoche (Gesamt)"),
            &d.group_weekly,
            &d.order,
            sel.group.selected(),
        )
    });

    ViewModel {
        metrics: overview_metrics(d),
        records: d.data.has_names.then(|| record_metrics(&d.records)),
        detail: detail_table(d, &filtered),
        loaded_at: d.loaded_at.as_ref().map(format_timestamp),
        has_groups: d.data.has_groups,
        has_names: d.data.has_names,
        has_weeks: d.data.has_weeks,
        selection: sel,
        options,
        period,
        filter_label,
        group_bars,
        runner_bars,
        team_board,
        runner_board,
        weekly,
        cumulative,
        notices,
    }
}

fn overview_metrics(d: &Dashboard) -> Vec<Metric> {
    let mut out = vec![
        Metric {
            label: s!("Gesamt-KM"),
            value: km!(d.overview.total_km),
            caption: None,
            help: s!("Gesamte Laufstrecke aller Teilnehmer seit Beginn der Challenge."),
        },
        Metric {
            label: s!("Anzahl Läufe"),
            value: d.overview.run_count.to_string(),
            caption: None,
            help: s!("Gesamtzahl aller gemeldeten Laufeinheiten."),
        },
    ];
    if d.data.has_groups {
        out.push(Metric {
            label: s!("Anzahl Gruppen"),
            value: d.overview.group_count.to_string(),
            caption: None,
            help: s!("Anzahl der Teams, die an der Challenge teilnehmen."),
        });
    }
    out
}

fn record_metrics(records: &Records) -> Vec<Metric> {
    let mut out = Vec::with_capacity(2);
    if let Some(lr) = &records.longest_run {
        let who = lr.name.as_deref().unwrap_or("?");
        let caption = match lr.date {
            Some(date) => format!("Rekordhalter: {who} ({})", date.format("%d.%m.")),
            None => format!("Rekordhalter: {who}"),
        };
        out.push(Metric {
            label: s!("Längste Einzeldistanz"),
            value: km!(lr.km),
            caption: Some(caption),
            help: s!("Die höchste Kilometerzahl, die ein Läufer in einem einzigen Eintrag gemeldet hat."),
        });
    }
    if let Some(p) = &records.most_prolific {
        out.push(Metric {
            label: s!("Fleißigster Läufer (Anzahl Läufe)"),
            value: format!("{} Läufe", p.runs),
            caption: Some(join!("Rekordhalter: ", &p.display_names())),
            help: s!("Der Läufer mit der höchsten Gesamtzahl an gemeldeten Einheiten."),
        });
    }
    out
}

fn detail_table(d: &Dashboard, filtered: &[&Run]) -> DetailTable {
    DetailTable {
        headers: d.data.headers.clone(),
        rows: filtered
            .iter()
            .filter_map(|r| d.cells.get(r.row).cloned())
            .collect(),
        groups: filtered
            .iter()
            .filter(|r| r.row < d.cells.len())
            .map(|r| r.group.clone())
            .collect(),
    }
}
