// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::Path;

use eframe::egui::{IconData, ViewportBuilder};
use laufchallenge::{config::consts::LOGO_PATH, config::state::GuiState, gui};

/// Club logo as window icon; the default icon when the file is missing.
fn app_icon(path: &Path) -> Option<IconData> {
    let bytes = std::fs::read(path).ok()?;
    let rgba = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(IconData { rgba: rgba.into_raw(), width: w, height: h })
}

fn main() {
    let gui = GuiState::default();
    let mut viewport = ViewportBuilder::default()
        .with_inner_size([gui.window_w as f32, gui.window_h as f32]);
    if let Some(icon) = app_icon(Path::new(LOGO_PATH)) {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
