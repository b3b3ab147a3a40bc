//! CLI argument definitions for the summary-statistics harmoniser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sumstat-harmoniser",
    version,
    about = "GWAS summary-statistics schema reconciler",
    long_about = "Reconcile heterogeneous GWAS summary-statistics files against a\n\
                  canonical column schema, producing the per-file mapping metadata\n\
                  consumed by the downstream harmonisation step."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Write logs to a file (overrides the config's log_file).
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile all files in the configured data directory and write the
    /// mapping artifact.
    Reconcile(ReconcileArgs),

    /// Print the canonical-field candidate table.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Path to the JSON run configuration.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Resolve and report without writing the mapping artifact.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Path to the candidate table JSON file.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,
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
