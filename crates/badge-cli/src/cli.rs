//! CLI argument definitions for the badge maker.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "badge-maker",
    version,
    about = "Name badge maker - turn an attendee CSV into a printable badge sheet",
    long_about = "Turn an attendee CSV into a printable .docx badge sheet.\n\n\
                  Eight 9 x 6 cm badges per A4 page, each with the logo, the attendee's\n\
                  name and organisation, and an optional annotation. Cells may pack\n\
                  several attendees separated by ';'."
)]
pub struct Cli {
    /// Attendee CSV with "First name of attendee", "Last name of attendee",
    /// "Organisation" and optionally "additional" columns.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// Logo image placed on every badge (PNG, JPEG, GIF, BMP or TIFF).
    #[arg(value_name = "LOGO")]
    pub logo: PathBuf,

    /// Destination .docx file (overwritten if it exists).
    #[arg(value_name = "OUTPUT_DOCX")]
    pub output: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Include attendee names in trace-level logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
