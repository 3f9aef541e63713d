// src/gui/components/sidebar.rs
//
// Left panel: logo, title, the three cascading selectors, refresh.
// A selector change re-renders immediately; the next selector's options
// come from the fresh view model.

use eframe::egui::{self, RichText, load::SizedTexture};

use crate::gui::app::App;
use crate::gui::theme;
use crate::view::color;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        match &app.logo {
            Some(tex) => {
                ui.add(egui::Image::from_texture(SizedTexture::from_handle(tex)).max_width(180.0));
            }
            None => {
                ui.label(RichText::new("Logo nicht gefunden").small().weak());
            }
        }
        ui.label(
            RichText::new("Laufchallenge")
                .color(theme::c32(color::PRIMARY))
                .strong()
                .size(26.0),
        );
    });
    ui.separator();

    ui.label(RichText::new("Filter").strong());

    let Some((options, has_groups, has_names, has_weeks)) = app
        .view
        .as_ref()
        .map(|vm| (vm.options.clone(), vm.has_groups, vm.has_names, vm.has_weeks))
    else {
        ui.label(RichText::new("Keine Daten geladen").weak());
        refresh_button(ui, app);
        return;
    };

    let mut sel = app.state.gui.selection.clone();

    // A selector is only offered when its column exists.
    if has_groups {
        egui::ComboBox::from_label("Gruppe")
            .selected_text(sel.group.to_string())
            .show_ui(ui, |ui| {
                for c in &options.groups {
                    ui.selectable_value(&mut sel.group, c.clone(), c.to_string());
                }
            });
    }

    if has_names {
        egui::ComboBox::from_label("Name")
            .selected_text(sel.runner.to_string())
            .show_ui(ui, |ui| {
                for c in &options.runners {
                    ui.selectable_value(&mut sel.runner, c.clone(), c.to_string());
                }
            });
    }

    if has_weeks {
        egui::ComboBox::from_label("Kalenderwoche")
            .selected_text(sel.week.to_string())
            .show_ui(ui, |ui| {
                for w in &options.weeks {
                    ui.selectable_value(&mut sel.week, *w, w.to_string());
                }
            });
    }

    if sel != app.state.gui.selection {
        logf!("UI: Selection → group={} runner={} week={}", sel.group, sel.runner, sel.week);
        app.state.gui.selection = sel;
        app.rebuild_view();
    }

    ui.add_space(12.0);
    ui.checkbox(&mut app.state.gui.show_details, "Detailtabelle anzeigen");
    ui.separator();
    refresh_button(ui, app);
}

fn refresh_button(ui: &mut egui::Ui, app: &mut App) {
    if ui.button("Daten neu laden").clicked() {
        logf!("UI: manual refresh");
        app.load(true);
    }
    ui.label(RichText::new(format!("Status: {}", app.status)).small());
}
