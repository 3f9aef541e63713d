// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod csv;

pub mod source;
pub mod normalize;
pub mod week;
pub mod aggregate;
pub mod filter;
pub mod view;
pub mod dashboard;

pub mod cli;
pub mod file;
pub mod gui;
