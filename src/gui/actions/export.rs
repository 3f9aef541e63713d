// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!(
            "Export: Out path set → {}",
            app.state.options.export.out_path().display()
        );
        app.out_path_dirty = false;
    }

    let status_msg = match super::current_detail(app) {
        None => {
            logd!("Export: Clicked, but there's no data");
            s!("Nothing to export (no data loaded)")
        }
        Some(detail) if detail.rows.is_empty() => {
            logd!("Export: Clicked, but there's nothing to export");
            s!("Nothing to export")
        }
        Some(detail) => {
            let export = &app.state.options.export;
            logf!(
                "Export: Begin rows={}, headers={}, type={:?}",
                detail.rows.len(),
                detail.headers.len(),
                export.export_type
            );
            match file::write_export(export, detail) {
                Ok(paths) => match paths.last() {
                    Some(last) => {
                        logf!("Export: OK count={} last={}", paths.len(), last.display());
                        format!("Exported {} file(s). Last: {}", paths.len(), last.display())
                    }
                    None => {
                        logf!("Export: OK count=0");
                        s!("Nothing to export (no grouped rows)")
                    }
                },
                Err(e) => {
                    loge!("Export: Error: {}", e);
                    format!("Export error: {e}")
                }
            }
        }
    };

    // mutate app only after the detail borrows are gone
    app.status(status_msg);
}
