// src/gui/components/charts.rs
//
// Paints `ChartSpec`s with the egui painter: y grid, category axis, bars or
// polylines with markers. Colours and emphasis come from the spec.

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use crate::dashboard::ViewModel;
use crate::gui::theme::{self, c32};
use crate::view::{ChartSpec, LineSeries, Plot, color};

const CHART_HEIGHT: f32 = 320.0;
const MARGIN_LEFT: f32 = 56.0;
const MARGIN_BOTTOM: f32 = 40.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_RIGHT: f32 = 12.0;
const Y_TICKS: usize = 5;

pub fn draw_comparisons(ui: &mut egui::Ui, vm: &ViewModel) {
    if let Some(spec) = &vm.group_bars {
        theme::heading(ui, format!("Gruppen-KM-Vergleich ({})", vm.period));
        chart(ui, spec);
        ui.add_space(12.0);
    }
    theme::heading(ui, format!("Einzelwertung: Kilometer-Vergleich nach Name ({})", vm.period));
    if let Some(spec) = &vm.runner_bars {
        chart(ui, spec);
    }
}

pub fn draw_development(ui: &mut egui::Ui, vm: &ViewModel) {
    if let Some(spec) = &vm.weekly {
        theme::heading(ui, "Kilometer-Entwicklung pro Kalenderwoche (KW)");
        chart(ui, spec);
        ui.add_space(12.0);
    }
    if let Some(spec) = &vm.cumulative {
        theme::heading(ui, "Gruppen-Wettbewerb: Kumulierte Kilometer-Entwicklung (Statisch)");
        chart(ui, spec);
        if let Plot::Lines(lines) = &spec.plot {
            legend(ui, lines);
        }
    }
}

pub fn chart(ui: &mut egui::Ui, spec: &ChartSpec) {
    let width = ui.available_width().max(200.0);
    let (resp, painter) = ui.allocate_painter(Vec2::new(width, CHART_HEIGHT), Sense::hover());
    let outer = resp.rect;

    let text = c32(color::TEXT);
    let grid = c32(color::SECONDARY_BACKGROUND);
    let small = FontId::proportional(11.0);

    painter.text(
        Pos2::new(outer.left() + 4.0, outer.top() + 2.0),
        Align2::LEFT_TOP,
        &spec.title,
        FontId::proportional(15.0),
        text,
    );

    let plot = Rect::from_min_max(
        Pos2::new(outer.left() + MARGIN_LEFT, outer.top() + MARGIN_TOP),
        Pos2::new(outer.right() - MARGIN_RIGHT, outer.bottom() - MARGIN_BOTTOM),
    );

    let (top, step) = y_scale(spec.max_value());
    let y_of = |v: f64| plot.bottom() - (v / top) as f32 * plot.height();

    // Grid + y labels
    for i in 0..=Y_TICKS {
        let v = step * i as f64;
        let y = y_of(v);
        painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], Stroke::new(1.0, grid));
        painter.text(Pos2::new(plot.left() - 6.0, y), Align2::RIGHT_CENTER, fmt_tick(v), small.clone(), text);
    }
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], Stroke::new(1.0, text));
    painter.line_segment([plot.left_top(), plot.left_bottom()], Stroke::new(1.0, text));
    painter.text(
        Pos2::new(outer.left() + 2.0, plot.top() - 4.0),
        Align2::LEFT_BOTTOM,
        &spec.y_label,
        small.clone(),
        text,
    );
    painter.text(
        Pos2::new(plot.center().x, outer.bottom() - 2.0),
        Align2::CENTER_BOTTOM,
        &spec.x_label,
        small.clone(),
        text,
    );

    let n = spec.categories.len();
    if n == 0 {
        return;
    }
    let slot = plot.width() / n as f32;
    let x_of = |i: usize| plot.left() + slot * (i as f32 + 0.5);

    // Category labels; thin out when they would overlap.
    let every = ((n as f32 * 48.0) / plot.width()).ceil().max(1.0) as usize;
    for (i, cat) in spec.categories.iter().enumerate().step_by(every) {
        painter.text(Pos2::new(x_of(i), plot.bottom() + 4.0), Align2::CENTER_TOP, cat, small.clone(), text);
    }

    match &spec.plot {
        Plot::Bars(bars) => {
            let bar_w = slot * 0.9;
            for (i, bar) in bars.iter().enumerate() {
                let y = y_of(bar.value);
                let r = Rect::from_min_max(
                    Pos2::new(x_of(i) - bar_w / 2.0, y),
                    Pos2::new(x_of(i) + bar_w / 2.0, plot.bottom()),
                );
                painter.rect_filled(r, 2.0, c32(bar.color));
            }
        }
        Plot::Lines(lines) => {
            // Emphasised series last so it sits on top.
            let mut order: Vec<&LineSeries> = lines.iter().collect();
            order.sort_by(|a, b| a.style.width.total_cmp(&b.style.width));

            for line in order {
                let pts: Vec<Pos2> = line
                    .points
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| Pos2::new(x_of(i), y_of(v))))
                    .collect();
                let stroke = Stroke::new(line.style.width, c32(line.style.color));
                if line.style.dashed {
                    painter.extend(Shape::dashed_line(&pts, stroke, 3.0, 3.0));
                } else {
                    painter.add(Shape::line(pts.clone(), stroke));
                }
                for p in pts {
                    painter.circle_filled(p, line.style.marker_radius, c32(line.style.color));
                }
            }
        }
    }

    // Hover readout for the category under the pointer.
    if let Some(pos) = resp.hover_pos() {
        if plot.contains(pos) {
            let i = (((pos.x - plot.left()) / slot) as usize).min(n - 1);
            let readout = match &spec.plot {
                Plot::Bars(bars) => bars.get(i).map(|b| format!("{}: {}", spec.categories[i], km!(b.value))),
                Plot::Lines(lines) => {
                    let parts: Vec<String> = lines
                        .iter()
                        .filter_map(|l| l.points.get(i).copied().flatten().map(|v| format!("{} {}", l.name, km!(v))))
                        .collect();
                    (!parts.is_empty()).then(|| format!("KW {}: {}", spec.categories[i], parts.join(" | ")))
                }
            };
            if let Some(t) = readout {
                painter.text(pos + Vec2::new(10.0, -14.0), Align2::LEFT_BOTTOM, t, small, c32(color::PRIMARY));
            }
        }
    }
}

fn legend(ui: &mut egui::Ui, lines: &[LineSeries]) {
    ui.horizontal_wrapped(|ui| {
        ui.label("Gruppe:");
        for l in lines {
            let (r, p) = ui.allocate_painter(Vec2::splat(12.0), Sense::hover());
            p.rect_filled(r.rect.shrink(1.0), 2.0, c32(l.style.color));
            ui.label(l.name.as_str());
        }
    });
}

/// Axis top and tick step: 5 steps of 1/2/5 × 10^k covering `max`.
pub fn y_scale(max: f64) -> (f64, f64) {
    if max <= 0.0 || !max.is_finite() {
        return (Y_TICKS as f64, 1.0);
    }
    let raw = max / Y_TICKS as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    (step * Y_TICKS as f64, step)
}

fn fmt_tick(v: f64) -> String {
    if v.fract() == 0.0 { format!("{v:.0}") } else { format!("{v:.1}") }
}

#[cfg(test)]
mod tests {
    use super::y_scale;

    #[test]
    fn scale_covers_max() {
        assert_eq!(y_scale(0.0), (5.0, 1.0));
        let (top, step) = y_scale(37.0);
        assert_eq!(step, 10.0);
        assert!(top >= 37.0);
        let (top, _) = y_scale(4.2);
        assert!(top >= 4.2);
    }
}
