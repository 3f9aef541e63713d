// src/bin/cli.rs
use color_eyre::eyre::{Result, eyre};
use laufchallenge::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::run().map_err(|e| eyre!("{e}"))
}
