//! Command-line argument definitions for the METAR decoder
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ConfigOverrides;
use crate::constants::MAX_WORKERS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the METAR decoder
///
/// Decodes METAR aviation weather reports into typed values, one report per
/// line, printed for humans or as JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-decoder",
    version,
    about = "Decode METAR aviation weather reports",
    long_about = "Decodes METAR aviation weather reports group by group: station, time, \
                  wind, visibility, runway visual range, weather, clouds, temperature, \
                  pressure, recent weather, wind shear and trend. Malformed groups are \
                  reported next to the decoded values instead of failing the report."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the METAR decoder
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode reports given on the command line, in a file or on stdin
    Decode(DecodeArgs),
    /// Decode every report of a file or directory tree into JSON lines
    Batch(BatchArgs),
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Reports to decode
    ///
    /// Quote each report. When none are given, reports are read from --file
    /// or, failing that, from stdin.
    #[arg(value_name = "REPORT")]
    pub reports: Vec<String>,

    /// File with one report per line
    ///
    /// Blank lines and lines starting with '#' are skipped.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        help = "Read reports from a file, one per line"
    )]
    pub file: Option<PathBuf>,

    /// Stop at the first malformed group of each report
    #[arg(long = "strict", help = "Stop decoding a report at its first malformed group")]
    pub strict: bool,

    /// Upper bound for a single group match, overriding the config file
    #[arg(
        long = "match-budget-ms",
        value_name = "MS",
        help = "Time limit for matching one report group, in milliseconds"
    )]
    pub match_budget_ms: Option<u64>,

    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for decoded reports"
    )]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// TOML configuration file for decoder settings. If not specified,
    /// looks for ~/.config/metar-decoder/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Report file, or directory searched for .txt and .metar files
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Report file or directory of report files"
    )]
    pub input_path: PathBuf,

    /// Output file for JSON lines
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write JSON lines to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,

    /// Stop at the first malformed group of each report
    #[arg(long = "strict", help = "Stop decoding a report at its first malformed group")]
    pub strict: bool,

    /// Upper bound for a single group match, overriding the config file
    #[arg(
        long = "match-budget-ms",
        value_name = "MS",
        help = "Time limit for matching one report group, in milliseconds"
    )]
    pub match_budget_ms: Option<u64>,

    /// Number of parallel workers
    ///
    /// Defaults to the number of logical CPUs.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers for decoding"
    )]
    pub workers: Option<usize>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress progress and summary output",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for decoded reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// One JSON document per report
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

/// Map verbosity flags to a tracing level
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Strict flag as a configuration override, unset unless given
fn strict_override(strict: bool) -> Option<bool> {
    strict.then_some(true)
}

fn validate_config_file(config_file: Option<&PathBuf>) -> Result<()> {
    if let Some(config_file) = config_file {
        if !config_file.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                config_file.display()
            )));
        }
    }
    Ok(())
}

impl DecodeArgs {
    /// Validate the decode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.reports.is_empty() && self.file.is_some() {
            return Err(Error::configuration(
                "Give reports either as arguments or with --file, not both".to_string(),
            ));
        }

        if let Some(file) = &self.file {
            if !file.is_file() {
                return Err(Error::configuration(format!(
                    "Report file does not exist: {}",
                    file.display()
                )));
            }
        }

        validate_config_file(self.config_file.as_ref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            strict: strict_override(self.strict),
            match_budget_ms: self.match_budget_ms,
        }
    }
}

impl BatchArgs {
    /// Validate the batch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0".to_string(),
                ));
            }

            if workers > MAX_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        validate_config_file(self.config_file.as_ref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Worker count, defaulting to the number of logical CPUs
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(num_cpus::get)
            .clamp(1, MAX_WORKERS)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            strict: strict_override(self.strict),
            match_budget_ms: self.match_budget_ms,
        }
    }
}
