// src/gui/actions/copy.rs
use eframe::egui;
use crate::{csv::to_export_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let txt = {
        let Some(detail) = super::current_detail(app) else {
            app.status("Nothing to copy (no data loaded)");
            logd!("Copy: Clicked, but there's no data");
            return;
        };
        if detail.rows.is_empty() {
            app.status("Nothing to copy");
            logd!("Copy: Clicked, but there's nothing to copy");
            return;
        }

        let export = &app.state.options.export;
        logf!("Copy: rows={}, headers={}", detail.rows.len(), detail.headers.len());
        to_export_string(&detail.headers, &detail.rows, export.include_headers, export.delim())
    };

    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
