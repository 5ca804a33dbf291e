//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the decode and batch commands.

use crate::config::{ConfigOverrides, DecoderConfig};
use crate::constants::LOG_TARGET;
use crate::decoder::MetarDecoder;
use crate::models::{DecodeTermination, DecodedMetar};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Decoding statistics for reporting across all commands
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodeStats {
    /// Number of report files read
    pub files_processed: usize,
    /// Number of reports decoded
    pub reports_decoded: usize,
    /// Reports carrying at least one decoding exception
    pub reports_with_exceptions: usize,
    /// Reports stopped early by a NIL status
    pub nil_reports: usize,
    /// Reports whose strict decoding aborted
    pub strict_aborts: usize,
    /// Total processing time
    #[serde(skip)]
    pub processing_time: Duration,
}

impl DecodeStats {
    /// Count one decoded report
    pub fn record(&mut self, report: &DecodedMetar) {
        self.reports_decoded += 1;
        if !report.is_valid() {
            self.reports_with_exceptions += 1;
        }
        match report.termination {
            DecodeTermination::NilExit => self.nil_reports += 1,
            DecodeTermination::StrictAbort => self.strict_aborts += 1,
            DecodeTermination::ChainExhausted => {}
        }
    }

    /// Fold another set of counts into this one
    pub fn merge(&mut self, other: &DecodeStats) {
        self.files_processed += other.files_processed;
        self.reports_decoded += other.reports_decoded;
        self.reports_with_exceptions += other.reports_with_exceptions;
        self.nil_reports += other.nil_reports;
        self.strict_aborts += other.strict_aborts;
    }

    /// Share of reports decoded without any exception, in percent
    pub fn clean_rate(&self) -> f64 {
        if self.reports_decoded == 0 {
            0.0
        } else {
            (self.reports_decoded - self.reports_with_exceptions) as f64
                / self.reports_decoded as f64
                * 100.0
        }
    }
}

/// Set up structured logging
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build a decoder from layered configuration (defaults -> file -> args)
pub fn load_decoder(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<MetarDecoder> {
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file given, using defaults or the per-user config file"),
    }

    let config = DecoderConfig::load_layered(config_file, overrides)?;
    debug!("Loaded configuration: {:?}", config);

    MetarDecoder::from_config(&config)
}

/// Serialize one value as a single JSON line
pub fn to_json_line<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::serialization("Failed to serialize decoded report".to_string(), e))
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
