// src/view/chart.rs
//
// Toolkit-neutral chart descriptions. The GUI paints them, the CLI prints
// them; neither decides colours, order or emphasis on its own.

use std::collections::HashMap;

use super::color::{self, Rgb};
use crate::aggregate::GroupWeek;
use crate::week::WeekOrder;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Category axis, left to right.
    pub categories: Vec<String>,
    pub plot: Plot,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Plot {
    /// One bar per category, same order.
    Bars(Vec<Bar>),
    Lines(Vec<LineSeries>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub value: f64,
    pub color: Rgb,
    pub emphasized: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub name: String,
    /// One slot per category; `None` = no point there.
    pub points: Vec<Option<f64>>,
    pub style: LineStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: f32,
    pub dashed: bool,
    pub marker_radius: f32,
}

impl LineStyle {
    pub const SELECTED: LineStyle =
        LineStyle { color: color::PRIMARY, width: 4.0, dashed: false, marker_radius: 5.0 };
    pub const MUTED: LineStyle =
        LineStyle { color: color::MUTED, width: 1.5, dashed: true, marker_radius: 2.5 };

    pub const fn plain(color: Rgb) -> Self {
        LineStyle { color, width: 2.0, dashed: false, marker_radius: 3.0 }
    }
}

/// Emphasis applies only when the selected label is actually on the chart;
/// otherwise every entity gets its own palette colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight<'a> {
    Palette,
    Selected(&'a str),
}

impl<'a> Highlight<'a> {
    pub fn resolve<'b>(selected: Option<&'a str>, mut labels: impl Iterator<Item = &'b str>) -> Self {
        match selected {
            Some(sel) if labels.any(|l| l == sel) => Highlight::Selected(sel),
            _ => Highlight::Palette,
        }
    }

    /// Bar colour and whether the bar is the emphasised one.
    pub fn bar(&self, label: &str, index: usize) -> (Rgb, bool) {
        match self {
            Highlight::Palette => (color::palette(index), false),
            Highlight::Selected(sel) if *sel == label => (color::PRIMARY, true),
            Highlight::Selected(_) => (color::MUTED, false),
        }
    }

    pub fn line(&self, label: &str, index: usize) -> LineStyle {
        match self {
            Highlight::Palette => LineStyle::plain(color::palette(index)),
            Highlight::Selected(sel) if *sel == label => LineStyle::SELECTED,
            Highlight::Selected(_) => LineStyle::MUTED,
        }
    }
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Largest value on the chart (0 when empty); the painter's y-range.
    pub fn max_value(&self) -> f64 {
        let it: Box<dyn Iterator<Item = f64>> = match &self.plot {
            Plot::Bars(bars) => Box::new(bars.iter().map(|b| b.value)),
            Plot::Lines(lines) => Box::new(lines.iter().flat_map(|l| l.points.iter().flatten().copied())),
        };
        it.fold(0.0, f64::max)
    }
}

/// Entity comparison bars (groups or runners), in the given order.
pub fn comparison_bars(
    title: String,
    x_label: &str,
    y_label: &str,
    data: &[(String, f64)],
    selected: Option<&str>,
) -> ChartSpec {
    let hl = Highlight::resolve(selected, data.iter().map(|(l, _)| l.as_str()));
    let bars = data
        .iter()
        .enumerate()
        .map(|(i, (label, km))| {
            let (color, emphasized) = hl.bar(label, i);
            Bar { value: *km, color, emphasized }
        })
        .collect();

    ChartSpec {
        title,
        x_label: s!(x_label),
        y_label: s!(y_label),
        categories: data.iter().map(|(l, _)| l.clone()).collect(),
        plot: Plot::Bars(bars),
    }
}

/// Single-colour bars, one per week of `data` (already on the week axis).
pub fn week_bars(title: String, data: &[(String, f64)]) -> ChartSpec {
    ChartSpec {
        title,
        x_label: s!("Kalenderwoche"),
        y_label: s!("KM"),
        categories: data.iter().map(|(w, _)| w.clone()).collect(),
        plot: Plot::Bars(
            data.iter()
                .map(|(_, km)| Bar { value: *km, color: color::PRIMARY, emphasized: false })
                .collect(),
        ),
    }
}

/// One line per group over the challenge week axis.
pub fn cumulative_lines(title: String, data: &[GroupWeek], order: &WeekOrder, selected: Option<&str>) -> ChartSpec {
    // `data` is sorted by group; keep first-seen order for palette stability.
    let mut groups: Vec<&str> = Vec::new();
    let mut points: HashMap<&str, Vec<Option<f64>>> = HashMap::new();
    for gw in data {
        let slots = points.entry(gw.group.as_str()).or_insert_with(|| {
            groups.push(gw.group.as_str());
            vec![None; order.len()]
        });
        if let Some(pos) = order.position(&gw.week_label) {
            slots[pos] = Some(gw.cumulative_km);
        }
    }

    let hl = Highlight::resolve(selected, groups.iter().copied());
    let series = groups
        .iter()
        .enumerate()
        .map(|(i, g)| LineSeries {
            name: s!(*g),
            points: points.remove(g).unwrap_or_default(),
            style: hl.line(g, i),
        })
        .collect();

    ChartSpec {
        title,
        x_label: s!("Kalenderwoche"),
        y_label: s!("Kumulierte KM"),
        categories: order.labels().to_vec(),
        plot: Plot::Lines(series),
    }
}
