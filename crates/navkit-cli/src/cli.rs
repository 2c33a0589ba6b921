//! CLI argument definitions for navkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "navkit",
    version,
    about = "Replay and inspect navigation history sessions",
    long_about = "Replay scripted browsing sessions against a navigation history.\n\n\
                  Shows the resulting back/forward stacks, interaction mode and\n\
                  every change published along the way."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply an operation script to a fresh history and print the result.
    Replay(ReplayArgs),

    /// Show how URLs normalize, or why they are rejected.
    Normalize(NormalizeArgs),

    /// Print the effective configuration.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Script file with one operation per line, or '-' for stdin.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Configuration file (default: the platform config file, if any).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How to print the final state.
    #[arg(long = "format", value_enum, default_value = "plain")]
    pub format: OutputFormatArg,

    /// Print every published change before the final state.
    #[arg(long = "events")]
    pub events: bool,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Raw URLs to normalize.
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Configuration file (default: the platform config file, if any).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Print the config file path instead of its contents.
    #[arg(long = "path")]
    pub path: bool,

    /// Configuration file (default: the platform config file, if any).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Plain,
    Table,
    Json,
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
