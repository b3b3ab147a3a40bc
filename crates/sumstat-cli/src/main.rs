//! GWAS summary-statistics harmoniser CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use sumstat_cli::config::load_config;
use sumstat_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_fields, run_reconcile};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let exit_code = run(&cli);
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    match &cli.command {
        Command::Reconcile(args) => {
            // Config load failures are fatal before any file is touched.
            let config = match load_config(&args.config) {
                Ok(config) => config,
                Err(error) => {
                    eprintln!("error: {error}");
                    return 1;
                }
            };
            let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
            if let Err(error) = init_logging(&log_config_from_cli(cli, log_file)) {
                eprintln!("error: failed to initialize logging: {error}");
                return 1;
            }
            match run_reconcile(args, &config) {
                Ok(report) => {
                    print_summary(&report);
                    0
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Command::Fields(args) => {
            if let Err(error) = init_logging(&log_config_from_cli(cli, cli.log_file.clone())) {
                eprintln!("error: failed to initialize logging: {error}");
                return 1;
            }
            match run_fields(args) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli, log_file: Option<PathBuf>) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_timestamps = log_file.is_some();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => log_file.is_none() && io::stderr().is_terminal(),
    };
    config.log_file = log_file;
    config
}
