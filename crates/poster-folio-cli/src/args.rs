//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use poster_folio::{DateStamp, StyleOverrides};

#[derive(Parser, Debug)]
#[command(
    name = "poster-folio",
    version,
    about = "Paginate long-form text into fixed-size poster pages",
    long_about = None
)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split text into pages.
    Paginate(PaginateArgs),
    /// Print content length and reading time.
    Stats(StatsArgs),
    /// List the built-in layout presets.
    Presets,
}

#[derive(Args, Debug)]
pub struct PaginateArgs {
    /// Input text file. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub style: StyleArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also list export file names, last page first.
    #[arg(long)]
    pub export_names: bool,

    /// Date stamped into export names, as YYYYMMDD. Defaults to today (UTC).
    #[arg(long, value_parser = parse_date_stamp)]
    pub date: Option<DateStamp>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Input text file. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Style layering: defaults, then `--preset`, then `--style`, then flags.
#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// Built-in preset id (see `presets`).
    #[arg(long)]
    pub preset: Option<String>,

    /// JSON file with style overrides (editor config keys, camelCase).
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub font_size: Option<f64>,

    #[arg(long)]
    pub title_font_size: Option<f64>,

    /// Line height multiplier.
    #[arg(long)]
    pub line_height: Option<f64>,

    /// Paragraph gap multiplier.
    #[arg(long)]
    pub paragraph_gap: Option<f64>,

    /// `3:4`, `9:16`, `custom` or any `W:H`.
    #[arg(long)]
    pub aspect_ratio: Option<String>,

    #[arg(long)]
    pub custom_width: Option<f64>,

    #[arg(long)]
    pub custom_height: Option<f64>,

    /// Turn off first-line indentation.
    #[arg(long)]
    pub no_indent: bool,
}

impl StyleArgs {
    /// Flag values as an override layer.
    pub fn overrides(&self) -> StyleOverrides {
        StyleOverrides {
            title: self.title.clone(),
            author: self.author.clone(),
            font_size: self.font_size,
            title_font_size: self.title_font_size,
            line_height: self.line_height,
            paragraph_gap: self.paragraph_gap,
            use_indentation: self.no_indent.then_some(false),
            aspect_ratio: self.aspect_ratio.clone(),
            custom_width: self.custom_width,
            custom_height: self.custom_height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable page dump.
    Text,
    /// Pretty-printed JSON.
    Json,
}

fn parse_date_stamp(value: &str) -> Result<DateStamp, String> {
    let format = time::format_description::parse("[year][month][day]")
        .map_err(|err| err.to_string())?;
    let date = time::Date::parse(value, &format)
        .map_err(|err| format!("expected YYYYMMDD, got {value:?}: {err}"))?;
    date_stamp(date)
}

/// Convert a calendar date into an export stamp.
pub fn date_stamp(date: time::Date) -> Result<DateStamp, String> {
    let year = u16::try_from(date.year()).map_err(|_| format!("year {} out of range", date.year()))?;
    Ok(DateStamp::new(year, u8::from(date.month()), date.day()))
}
