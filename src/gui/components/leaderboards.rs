// src/gui/components/leaderboards.rs
//
// Team and runner rankings side by side: rank, label and a progress bar
// scaled to the leader of the shown list.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::dashboard::ViewModel;
use crate::gui::theme::{self, c32};
use crate::view::{Leaderboard, color};

pub fn draw(ui: &mut egui::Ui, vm: &ViewModel) {
    if vm.team_board.is_none() && vm.runner_board.is_none() {
        return;
    }
    theme::heading(ui, format!("Aktuelle Bestenlisten ({})", vm.period));

    ui.columns(2, |cols| {
        if let Some(b) = &vm.team_board {
            board(&mut cols[0], "team_board", b);
        }
        if let Some(b) = &vm.runner_board {
            board(&mut cols[1], "runner_board", b);
        }
    });
}

fn board(ui: &mut egui::Ui, salt: &str, b: &Leaderboard) {
    ui.label(RichText::new(&b.title).strong());
    if b.is_empty() {
        ui.label(RichText::new("Keine Einträge").weak());
        return;
    }

    let fill = c32(color::PRIMARY);
    TableBuilder::new(ui)
        .id_salt(salt)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(28.0))
        .column(Column::initial(140.0).at_least(60.0).clip(true))
        .column(Column::remainder().at_least(120.0))
        .header(22.0, |mut header| {
            header.col(|ui| { ui.label(RichText::new("#").strong()); });
            header.col(|ui| { ui.label(RichText::new(&b.label_header).strong()); });
            header.col(|ui| { ui.label(RichText::new("KM").strong()); });
        })
        .body(|body| {
            body.rows(22.0, b.rows.len(), |mut row| {
                let Some(r) = b.rows.get(row.index()) else { return };
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(r.rank.to_string());
                    });
                });
                row.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Truncate);
                    ui.label(r.label.as_str());
                });
                row.col(|ui| {
                    ui.add(
                        egui::ProgressBar::new(r.fraction as f32)
                            .text(km!(r.total_km))
                            .fill(fill),
                    );
                });
            });
        });
}
