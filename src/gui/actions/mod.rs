// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,export}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs

pub use copy::copy;
pub use export::export;

use crate::{dashboard::DetailTable, gui::app::App};

#[inline]
pub(super) fn current_detail(app: &App) -> Option<&DetailTable> {
    app.view.as_ref().map(|vm| &vm.detail)
}
