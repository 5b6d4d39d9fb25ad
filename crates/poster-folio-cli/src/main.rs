//! Command-line front end for poster-folio.
//!
//! Usage:
//!   poster-folio paginate [INPUT] [--preset ID] [--style FILE] [--title T] [--format json]
//!   poster-folio stats [INPUT]
//!   poster-folio presets

mod args;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use poster_folio::{
    export_plan, ContentStats, DateStamp, ExportTarget, StyleMetrics, StyleOverrides, StylePreset,
};
use poster_folio_layout::{Page, PageBreak, Paginator};
use serde::Serialize;
use time::OffsetDateTime;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::args::{date_stamp, Cli, Command, OutputFormat, PaginateArgs, StatsArgs, StyleArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: logging disabled: {}", err);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Paginate(args) => run_paginate(args),
        Command::Stats(args) => run_stats(args),
        Command::Presets => {
            print_presets();
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct PaginateOutput<'a> {
    style: &'a StyleMetrics,
    stats: ContentStats,
    pages: &'a [Page],
    #[serde(skip_serializing_if = "Option::is_none")]
    exports: Option<Vec<ExportTarget>>,
}

fn run_paginate(args: PaginateArgs) -> Result<(), String> {
    let style = resolve_style(&args.style)?;
    let text = read_input(args.input.as_deref())?;
    let paginator = Paginator::new(&style).map_err(|err| err.to_string())?;
    let result = paginator.paginate(&text);
    log::debug!(
        "{} pages from {} content chars",
        result.len(),
        result.stats.content_length
    );

    let exports = if args.export_names {
        let date = match args.date {
            Some(date) => date,
            None => today()?,
        };
        Some(export_plan(result.len(), date, &style.title))
    } else {
        None
    };

    match args.format {
        OutputFormat::Json => {
            let output = PaginateOutput {
                style: &style,
                stats: result.stats,
                pages: &result.pages,
                exports,
            };
            let json = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let total = result.len();
            for page in &result {
                println!(
                    "--- page {}/{} ({}) ---",
                    page.index + 1,
                    total,
                    page_break_label(page)
                );
                if let Some(title) = page.title.as_deref().filter(|t| !t.is_empty()) {
                    println!("# {}", title);
                }
                println!("{}", page.content);
            }
            println!(
                "{} pages, {} chars, {} min read",
                total, result.stats.content_length, result.stats.reading_time_minutes
            );
            if let Some(exports) = exports {
                for target in exports {
                    println!("{}", target.file_name);
                }
            }
        }
    }
    Ok(())
}

fn page_break_label(page: &Page) -> &'static str {
    match page.layout.page_break {
        PageBreak::EndOfContent => "end",
        PageBreak::Split => "split",
        PageBreak::Deferred => "deferred",
        PageBreak::Forced => "forced",
    }
}

fn run_stats(args: StatsArgs) -> Result<(), String> {
    let text = read_input(args.input.as_deref())?;
    let stats = ContentStats::measure(&text);
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("content_length: {}", stats.content_length);
            println!("reading_time_minutes: {}", stats.reading_time_minutes);
        }
    }
    Ok(())
}

fn print_presets() {
    for preset in StylePreset::BUILT_IN {
        println!(
            "{:<14} {:<18} {:<13} font {} / title {} / line {} / gap {}",
            preset.id,
            preset.name,
            preset.category,
            preset.font_size,
            preset.title_font_size,
            preset.line_height,
            preset.paragraph_gap
        );
    }
}

fn resolve_style(args: &StyleArgs) -> Result<StyleMetrics, String> {
    let mut style = StyleMetrics::default();
    if let Some(id) = args.preset.as_deref() {
        let preset = StylePreset::by_id(id).ok_or_else(|| format!("unknown preset {:?}", id))?;
        preset.apply_to(&mut style);
    }
    if let Some(path) = args.style.as_deref() {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let overrides: StyleOverrides = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid style file {}: {}", path.display(), e))?;
        overrides.apply_to(&mut style).map_err(|e| e.to_string())?;
    }
    args.overrides()
        .apply_to(&mut style)
        .map_err(|e| e.to_string())?;
    Ok(style)
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e)),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("failed to read stdin: {}", e))?;
            Ok(text)
        }
    }
}

fn today() -> Result<DateStamp, String> {
    date_stamp(OffsetDateTime::now_utc().date())
}
