// src/gui/components/detail_table.rs
//
// Filtered rows with their original sheet columns. Purely a view.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::config::consts::{COL_KM, COL_WEEK};
use crate::gui::app::App;
use crate::gui::theme;

const MAX_HEIGHT: f32 = 420.0;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    let Some(vm) = app.view.as_ref() else { return };
    let detail = &vm.detail;

    theme::heading(ui, format!("Detailübersicht (Gefilterte Daten: {} Zeilen)", detail.rows.len()));

    let cols = detail.headers.len();
    if cols == 0 {
        return;
    }
    // Numeric columns centred, text left.
    let numeric: Vec<bool> = detail.headers.iter().map(|h| h == COL_KM || h == COL_WEEK).collect();

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    egui::ScrollArea::horizontal()
        .id_salt("detail_table_hscroll")
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .id_salt("detail_table")
                .striped(true)
                .min_scrolled_height(0.0)
                .max_scroll_height(MAX_HEIGHT);
            for ci in 0..cols {
                let w = if numeric[ci] { 60.0 } else { 140.0 };
                table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
            }

            table
                .header(24.0, |mut header| {
                    for h in &detail.headers {
                        header.col(|ui| {
                            ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                            ui.add(egui::Label::new(RichText::new(h.as_str()).strong()).selectable(false));
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, detail.rows.len(), |mut row| {
                        let Some(data) = detail.rows.get(row.index()) else { return };
                        for ci in 0..cols {
                            let cell = data.get(ci).map(String::as_str).unwrap_or("");
                            row.col(|ui| {
                                ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                if numeric[ci] {
                                    ui.centered_and_justified(|ui| { ui.label(cell); });
                                } else {
                                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(cell); });
                                }
                            });
                        }
                    });
                });
        });
}
