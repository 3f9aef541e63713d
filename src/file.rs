// src/file.rs

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportOptions, ExportType};
use crate::core::sanitize::sanitize_group_filename;
use crate::csv::to_export_string;
use crate::dashboard::DetailTable;

/// Export the detail table as configured: one file, or one file per group.
/// Returns every path written.
pub fn write_export(
    export: &ExportOptions,
    table: &DetailTable,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let written = match export.export_type {
        ExportType::SingleFile => vec![write_export_single(export, &table.headers, &table.rows)?],
        ExportType::PerGroup => write_export_per_group(export, table)?,
    };
    logf!("Export: {} file(s), {} row(s)", written.len(), table.rows.len());
    Ok(written)
}

/// Write a single export file based on ExportOptions (path, headers policy, delimiter).
/// Returns the final path written to.
pub fn write_export_single(
    export: &ExportOptions,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(headers, rows, export.include_headers, export.delim());
    fs::write(&path, contents)?;
    Ok(path)
}

/// One file per group into the directory implied by `export.out_path()`.
/// Rows without a group are skipped. Files come out in group-name order.
pub fn write_export_per_group(
    export: &ExportOptions,
    table: &DetailTable,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    let mut by_group: BTreeMap<&str, Vec<Vec<String>>> = BTreeMap::new();
    for (row, group) in table.rows.iter().zip(&table.groups) {
        if let Some(g) = group.as_deref() {
            by_group.entry(g).or_default().push(row.clone());
        }
    }

    // Dedup stems and write each file
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(by_group.len());
    let ext = export.format.ext();

    for (idx, (group, rows)) in by_group.into_iter().enumerate() {
        let stem = sanitize_group_filename(group, idx + 1);
        let path = resolve_group_filename(&outdir, &stem, &mut seen, ext);

        let contents = to_export_string(&table.headers, &rows, export.include_headers, export.delim());
        fs::write(&path, contents)?;
        written.push(path);
    }

    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_group_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv"
) -> PathBuf {
    // How many times have we seen this base?
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}
