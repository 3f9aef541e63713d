// src/gui/components/mod.rs
pub mod charts;
pub mod detail_table;
pub mod export_bar;
pub mod leaderboards;
pub mod overview;
pub mod sidebar;
