// src/config/options.rs
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub export: ExportOptions,
}

/// Where the running log comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Google sheet by id + worksheet (tab) name.
    Sheet { sheet_id: String, worksheet: String },
    /// Local CSV/TSV export of the same sheet. Offline use.
    Csv(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub kind: SourceKind,
    /// Explicit service-account file; falls back to the environment.
    pub credentials: Option<PathBuf>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            kind: SourceKind::Sheet {
                sheet_id: s!(SHEET_ID),
                worksheet: s!(WORKSHEET_NAME),
            },
            credentials: None,
        }
    }
}

impl SourceOptions {
    /// Explicit option first, then `LAUFCHALLENGE_CREDENTIALS`,
    /// then `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn credentials_path(&self) -> Option<PathBuf> {
        if let Some(p) = &self.credentials {
            return Some(p.clone());
        }
        [CREDENTIALS_ENV, CREDENTIALS_ENV_FALLBACK]
            .iter()
            .filter_map(|k| env::var_os(k))
            .find(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    pub fn describe(&self) -> String {
        match &self.kind {
            SourceKind::Sheet { sheet_id, worksheet } => format!("sheet {sheet_id} / {worksheet}"),
            SourceKind::Csv(p) => format!("csv {}", p.display()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    PerGroup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// Single file: `<dir>/<stem>.<ext>`. Per group: the directory only.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();

        match self.export_type {
            ExportType::SingleFile => {
                let stem = self.out_path.file_stem.to_string_lossy();
                path.push(join!(stem, ".", self.format.ext()));
            }
            ExportType::PerGroup => { /* directory only */ }
        }
        path
    }

    pub fn current_dir(&self) -> &Path {
        &self.out_path.dir
    }

    /// Parse GUI/CLI text into dir + stem. Ignores a typed extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            return;
        }

        match self.export_type {
            ExportType::SingleFile => {
                let p = Path::new(s);
                if let Some(parent) = p.parent() {
                    self.out_path.dir = parent.to_path_buf();
                }
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
            }
            ExportType::PerGroup => {
                self.out_path.dir = PathBuf::from(s);
            }
        }
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
