// src/gui/theme.rs
//
// Club branding on top of egui's light theme.

use eframe::egui::{self, Color32};

use crate::view::{Rgb, color};

#[inline]
pub fn c32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

pub fn apply(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::light());
    ctx.style_mut(|style| {
        let v = &mut style.visuals;
        v.panel_fill = c32(color::BACKGROUND);
        v.window_fill = c32(color::BACKGROUND);
        v.faint_bg_color = c32(color::SECONDARY_BACKGROUND);
        v.override_text_color = Some(c32(color::TEXT));
        v.selection.bg_fill = c32(color::PRIMARY);
        v.selection.stroke.color = Color32::WHITE;
        v.hyperlink_color = c32(color::PRIMARY);
    });
}

/// Section heading in the primary colour.
pub fn heading(ui: &mut egui::Ui, text: impl Into<String>) {
    ui.label(
        egui::RichText::new(text.into())
            .color(c32(color::PRIMARY))
            .strong()
            .size(18.0),
    );
}
