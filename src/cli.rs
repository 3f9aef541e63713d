// src/cli.rs
use std::{env, fmt::Write as _, path::PathBuf};

use crate::config::options::{AppOptions, ExportFormat, ExportType, SourceKind};
use crate::dashboard::{self, NO_DATA_NOTICE, Outcome, ViewModel};
use crate::filter::{Choice, Selection, WeekChoice};
use crate::source::{self, FetchCache};
use crate::view::{ChartSpec, Leaderboard, Plot};

const BAR_WIDTH: usize = 30;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    pub options: AppOptions,
    pub selection: Selection,
    /// `--export` given
    pub export: bool,
    pub refresh: bool,
    pub help: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }

    logf!("CLI: {} / {:?}", args.options.source.describe(), args.selection);
    let src = source::from_options(&args.options.source)?;
    let mut cache = FetchCache::new(src);
    let outcome = if args.refresh {
        dashboard::reload(&mut cache)?
    } else {
        dashboard::load(&mut cache)?
    };

    let dash = match outcome {
        Outcome::Ready(d) => d,
        Outcome::NoData { .. } => {
            println!("{NO_DATA_NOTICE}");
            return Ok(());
        }
    };

    let vm = dashboard::render(&dash, &args.selection);
    if vm.selection != args.selection {
        eprintln!("Hinweis: Auswahl angepasst auf {} / {} / {}", vm.selection.group, vm.selection.runner, vm.selection.week);
    }
    print!("{}", render_text(&vm));

    if args.export {
        let written = crate::file::write_export(&args.options.export, &vm.detail)?;
        for p in written {
            eprintln!("Wrote {}", p.display());
        }
    }
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<CliArgs, Box<dyn std::error::Error>> {
    let mut out = CliArgs::default();
    out.options.export.include_headers = false;
    let mut sheet_id: Option<String> = None;
    let mut worksheet: Option<String> = None;
    let mut export_path: Option<String> = None;

    let mut args = argv.into_iter();
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--credentials" => out.options.source.credentials = Some(PathBuf::from(args.next().ok_or("Missing value for --credentials")?)),
            "--csv" => out.options.source.kind = SourceKind::Csv(PathBuf::from(args.next().ok_or("Missing value for --csv")?)),
            "--sheet" => sheet_id = Some(args.next().ok_or("Missing value for --sheet")?),
            "--worksheet" => worksheet = Some(args.next().ok_or("Missing value for --worksheet")?),
            "--group" => out.selection.group = Choice::Only(args.next().ok_or("Missing value for --group")?.trim().to_string()),
            "--runner" => out.selection.runner = Choice::Only(args.next().ok_or("Missing value for --runner")?.trim().to_string()),
            "--week" => {
                let v: u32 = args.next().ok_or("Missing value for --week")?.trim().parse()?;
                if !(1..=53).contains(&v) { return Err(format!("Week out of range (1..53): {v}").into()); }
                out.selection.week = WeekChoice::Week(v); }
            "--export" | "-o" => export_path = Some(args.next().ok_or("Missing output path")?),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                out.options.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--per-group" => out.options.export.export_type = ExportType::PerGroup,
            "--include-headers" => out.options.export.include_headers = true,
            "--refresh" => out.refresh = true,
            "-h" | "--help" => out.help = true,
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if sheet_id.is_some() || worksheet.is_some() {
        if matches!(out.options.source.kind, SourceKind::Csv(_)) {
            return Err("--csv cannot be combined with --sheet/--worksheet".into());
        }
        if let SourceKind::Sheet { sheet_id: id, worksheet: ws } = &mut out.options.source.kind {
            if let Some(v) = sheet_id { *id = v; }
            if let Some(v) = worksheet { *ws = v; }
        }
    }

    // Path last: its meaning depends on --per-group.
    if let Some(p) = export_path {
        out.options.export.set_path(&p);
        out.export = true;
    }
    Ok(out)
}

/// Plain-text rendition of a view model.
pub fn render_text(vm: &ViewModel) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "== Laufchallenge Übersicht ==");
    if let Some(at) = &vm.loaded_at {
        let _ = writeln!(s, "Letzte Aktualisierung der Daten: {at}");
    }
    let _ = writeln!(s, "Auswahl: {} | Zeitraum: {}", vm.filter_label, vm.period);
    s.push('\n');

    for m in &vm.metrics {
        let _ = writeln!(s, "{:<20} {}", m.label, m.value);
    }
    if let Some(records) = &vm.records {
        s.push('\n');
        for m in records {
            let _ = writeln!(s, "{:<36} {}", m.label, m.value);
            if let Some(c) = &m.caption {
                let _ = writeln!(s, "    {c}");
            }
        }
    }

    for chart in [&vm.group_bars, &vm.runner_bars, &vm.weekly, &vm.cumulative].into_iter().flatten() {
        s.push('\n');
        write_chart(&mut s, chart);
    }
    for board in [&vm.team_board, &vm.runner_board].into_iter().flatten() {
        s.push('\n');
        write_board(&mut s, board);
    }
    for n in &vm.notices {
        let _ = writeln!(s, "\n{n}");
    }
    let _ = writeln!(s, "\nDetailübersicht: {} Zeile(n)", vm.detail.rows.len());
    s
}

fn write_chart(s: &mut String, chart: &ChartSpec) {
    let _ = writeln!(s, "-- {} --", chart.title);
    let max = chart.max_value();
    let width = chart.categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    match &chart.plot {
        Plot::Bars(bars) => {
            for (label, bar) in chart.categories.iter().zip(bars) {
                let mark = if bar.emphasized { '>' } else { ' ' };
                let _ = writeln!(s, "{mark} {label:<width$} {:>10} {}", km!(bar.value), bar_text(bar.value, max));
            }
        }
        Plot::Lines(lines) => {
            // Last cumulative value per series.
            for line in lines {
                let last = line.points.iter().rev().flatten().next().copied().unwrap_or(0.0);
                let _ = writeln!(s, "  {:<width$} {:>10} {}", line.name, km!(last), bar_text(last, max));
            }
        }
    }
}

fn write_board(s: &mut String, board: &Leaderboard) {
    let _ = writeln!(s, "-- {} --", board.title);
    for r in &board.rows {
        let filled = (r.fraction * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(s, "{:>3}. {:<24} {:>10} {}", r.rank, r.label, km!(r.total_km), "#".repeat(filled));
    }
}

fn bar_text(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return s!();
    }
    "#".repeat(((value / max) * BAR_WIDTH as f64).round() as usize)
}
