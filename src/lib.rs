//! METAR Decoder Library
//!
//! A Rust library for decoding METAR aviation weather reports into typed,
//! serializable values.
//!
//! This library provides tools for:
//! - Normalizing raw report lines (case, whitespace, `=` terminator)
//! - Decoding each grammar group with an ordered chain of chunk decoders
//! - Strict and lenient decoding, with per-chunk failures kept on the report
//! - Early exit on NIL reports and CAVOK-aware cloud decoding
//! - Layered configuration (defaults, TOML file, command-line overrides)
//! - A command-line front end for single reports and whole report archives
//!
//! ```
//! let report = metar_decoder::decode("KJFK 261651Z 18010KT 10SM FEW250 24/18 A3000");
//! assert_eq!(report.icao.as_deref(), Some("KJFK"));
//! assert!(report.is_valid());
//! ```

pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use config::{ConfigOverrides, DecoderConfig};
pub use decoder::{MetarDecoder, set_default_strict};
pub use error::{ChunkDecodeError, ChunkErrorKind, DecodingException, Disposition, Error, Result};
pub use models::{DecodeTermination, DecodedMetar, Unit, Value};

use once_cell::sync::Lazy;

static DEFAULT_DECODER: Lazy<MetarDecoder> = Lazy::new(MetarDecoder::new);

/// Decode one report with the standard chain and default settings
///
/// Strictness follows [`set_default_strict`], lenient unless set.
pub fn decode(raw: &str) -> DecodedMetar {
    DEFAULT_DECODER.decode(raw)
}
