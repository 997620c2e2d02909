//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Culprit: spectrum-based fault localization
#[derive(Parser, Debug)]
#[command(name = "culprit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank program elements by suspiciousness
    Localize(LocalizeArgs),

    /// Summarize a coverage matrix
    Diagnose(DiagnoseArgs),

    /// List the supported techniques
    Techniques,
}

/// Arguments for the localize command
#[derive(Parser, Debug)]
pub struct LocalizeArgs {
    /// Coverage matrix file (one row per test, last field `+` or `-`)
    #[arg(short, long)]
    pub matrix: PathBuf,

    /// Spectra file (one element description per line)
    #[arg(short, long)]
    pub spectra: PathBuf,

    /// Technique: dstar2, dstar3, jaccard, ochiai, tarantula, zoltar
    #[arg(short, long)]
    pub technique: String,

    /// Keep only the first N ranked lines
    #[arg(short = 'n', long = "top")]
    pub top: Option<usize>,

    /// Keep only lines whose rank is at most R
    #[arg(short = 'r', long = "max-rank")]
    pub max_rank: Option<usize>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, visible_short_alias = 'w')]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the diagnose command
#[derive(Parser, Debug)]
pub struct DiagnoseArgs {
    /// Coverage matrix file
    #[arg(short, long)]
    pub matrix: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(short, long, visible_short_alias = 'w')]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,
}

/// Report format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
