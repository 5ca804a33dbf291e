//! Command implementations for the METAR decoder CLI
//!
//! Each command is implemented in its own module:
//! - `decode`: decode reports from arguments, a file or stdin
//! - `batch`: decode report archives into JSON lines
//!
//! `shared` holds logging setup, configuration loading and statistics.

pub mod batch;
pub mod decode;
pub mod shared;

pub use shared::DecodeStats;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tracing::{debug, info};

/// Main command runner for the METAR decoder
///
/// Sets up logging for the selected subcommand, then dispatches to it.
/// Returns default statistics when no subcommand was given.
pub async fn run(args: Args) -> Result<DecodeStats> {
    match args.get_command() {
        Some(Commands::Decode(decode_args)) => {
            shared::setup_logging(decode_args.get_log_level(), decode_args.quiet)?;
            info!("Starting decode command");
            debug!("Command line arguments: {:?}", decode_args);
            decode::run_decode(decode_args).await
        }
        Some(Commands::Batch(batch_args)) => {
            shared::setup_logging(batch_args.get_log_level(), batch_args.quiet)?;
            info!("Starting batch command");
            debug!("Command line arguments: {:?}", batch_args);
            batch::run_batch(batch_args).await
        }
        None => Ok(DecodeStats::default()),
    }
}
