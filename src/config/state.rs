// src/config/state.rs
use super::options::AppOptions;
use crate::filter::Selection;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Current group / runner / week choice from the side panel
    pub selection: Selection,

    pub window_w: u32,
    pub window_h: u32,

    /// Show the filtered detail rows at the bottom of the page
    pub show_details: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            window_w: 1280,
            window_h: 900,
            show_details: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
