// src/gui/components/overview.rs
//
// Page header, refresh timestamp, and either the error, the no-data notice,
// or the metric cards + records.

use eframe::egui::{self, Color32, RichText};

use crate::dashboard::{Metric, NO_DATA_NOTICE};
use crate::gui::app::{App, Screen};
use crate::gui::theme;
use crate::view::color;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    ui.label(
        RichText::new("Laufchallenge Übersicht")
            .color(theme::c32(color::PRIMARY))
            .strong()
            .size(28.0),
    );
    if let Some(at) = &app.loaded_at {
        ui.label(RichText::new(format!("Letzte Aktualisierung der Daten: {at}")).weak());
    }
    ui.add_space(8.0);

    match &app.screen {
        Screen::Failed(msg) => {
            ui.label(RichText::new(msg).color(Color32::from_rgb(0xC0, 0x1C, 0x28)).strong());
            return;
        }
        Screen::NoData => {
            ui.label(NO_DATA_NOTICE);
            return;
        }
        Screen::Ready(_) => {}
    }

    let Some(vm) = app.view.as_ref() else { return };

    card(ui, "Aktueller Fortschritt (Gesamt)", &vm.metrics);
    if let Some(records) = &vm.records {
        ui.add_space(8.0);
        card(ui, "Rekorde & Bestleistungen", records);
    }
    for n in &vm.notices {
        ui.label(RichText::new(n).italics());
    }
}

fn card(ui: &mut egui::Ui, title: &str, metrics: &[Metric]) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().faint_bg_color)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            theme::heading(ui, title);
            if metrics.is_empty() {
                return;
            }
            ui.columns(metrics.len(), |cols| {
                for (col, m) in cols.iter_mut().zip(metrics) {
                    col.label(RichText::new(&m.label).weak()).on_hover_text(m.help.as_str());
                    col.label(RichText::new(&m.value).strong().size(24.0));
                    if let Some(c) = &m.caption {
                        col.label(RichText::new(c).small());
                    }
                }
            });
        });
}
