// src/gui/app.rs
use std::error::Error;
use std::path::Path;

use eframe::egui;

use crate::{
    config::{consts::LOGO_PATH, state::AppState},
    dashboard::{self, Dashboard, DashboardError, Outcome, ViewModel},
    source::{self, FetchCache},
};

use super::{components, theme};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Laufchallenge Dashboard | Suchsdorfer SV",
        options,
        Box::new(|cc| {
            theme::apply(&cc.egui_ctx);
            Ok(Box::new(App::new(&cc.egui_ctx, AppState::default())))
        }),
    )?;
    Ok(())
}

/// What the central panel shows.
pub enum Screen {
    Ready(Box<Dashboard>),
    NoData,
    /// Fatal: source or normalisation failed. Only the message is shown.
    Failed(String),
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub cache: Option<FetchCache>,
    pub screen: Screen,
    /// Last render of `screen` for `state.gui.selection`.
    pub view: Option<ViewModel>,
    pub loaded_at: Option<String>,

    pub logo: Option<egui::TextureHandle>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    pub status: String,
}

impl App {
    pub fn new(ctx: &egui::Context, state: AppState) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        let mut app = Self {
            state,
            cache: None,
            screen: Screen::NoData,
            view: None,
            loaded_at: None,
            logo: load_logo(ctx, Path::new(LOGO_PATH)),
            out_path_text,
            out_path_dirty: false,
            status: s!("Idle"),
        };

        match source::from_options(&app.state.options.source) {
            Ok(src) => {
                logf!("Init: source={}", src.describe());
                app.cache = Some(FetchCache::new(src));
                app.load(false);
            }
            Err(e) => {
                loge!("Init: {}", e);
                app.screen = Screen::Failed(e.to_string());
                app.status = s!("Error");
            }
        }
        app
    }

    /// Fetch (through the cache, or forced) and rebuild everything.
    pub fn load(&mut self, force: bool) {
        let Some(cache) = self.cache.as_mut() else { return };

        let res: Result<Outcome, DashboardError> =
            if force { dashboard::reload(cache) } else { dashboard::load(cache) };

        match res {
            Ok(Outcome::Ready(d)) => {
                self.loaded_at = d.loaded_at.as_ref().map(dashboard::format_timestamp);
                self.screen = Screen::Ready(d);
                self.status = s!("Ready");
            }
            Ok(Outcome::NoData { loaded_at }) => {
                self.loaded_at = loaded_at.as_ref().map(dashboard::format_timestamp);
                self.screen = Screen::NoData;
                self.status = s!("No data");
            }
            Err(e) => {
                loge!("Load: {}", e);
                self.screen = Screen::Failed(e.to_string());
                self.status = s!("Error");
            }
        }
        self.rebuild_view();
    }

    /// Re-render for the current selection; stale choices are written back.
    pub fn rebuild_view(&mut self) {
        self.view = match &self.screen {
            Screen::Ready(d) => {
                let vm = dashboard::render(d, &self.state.gui.selection);
                if vm.selection != self.state.gui.selection {
                    logd!("UI: selection reconciled → {:?}", vm.selection);
                    self.state.gui.selection = vm.selection.clone();
                }
                Some(vm)
            }
            _ => None,
        };
    }

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }
}

/// Side-panel logo. A missing or broken file only costs the picture.
fn load_logo(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            logw!("Logo: {} not loaded ({})", path.display(), e);
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            logf!("Logo: loaded {} ({}x{})", path.display(), size[0], size[1]);
            Some(ctx.load_texture("logo", color, egui::TextureOptions::default()))
        }
        Err(e) => {
            logw!("Logo: {} is not a readable image ({})", path.display(), e);
            None
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("filters")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                components::sidebar::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    components::overview::draw(ui, self);

                    let Some(vm) = self.view.as_ref() else { return };

                    ui.separator();
                    components::charts::draw_comparisons(ui, vm);
                    ui.add_space(12.0);
                    components::leaderboards::draw(ui, vm);
                    ui.add_space(12.0);
                    components::charts::draw_development(ui, vm);

                    if self.state.gui.show_details {
                        ui.separator();
                        components::export_bar::draw(ui, self);
                        ui.add_space(6.0);
                        components::detail_table::draw(ui, self);
                    }
                });
        });
    }
}
