//! METAR decoding engine
//!
//! A report is decoded by running its normalized text through an ordered
//! chain of chunk decoders, each owning one grammar production.
//!
//! # Architecture
//!
//! - [`chunk`] - Contract every chunk decoder implements, and matching helpers
//! - [`chunks`] - The fourteen chunk decoders in report order
//! - [`fields`] - Typed partial results merged into the decoded report
//! - [`chain`] - Normalization, strict/lenient recovery and chain hooks
//!
//! # Example Usage
//!
//! ```rust
//! use metar_decoder::decoder::MetarDecoder;
//!
//! let decoder = MetarDecoder::new();
//! let report = decoder.decode_lenient("KJFK 261651Z 18010KT 10SM FEW250 24/18 A3000");
//!
//! assert_eq!(report.icao.as_deref(), Some("KJFK"));
//! assert_eq!(report.air_temperature, Some(24));
//! assert!(report.is_valid());
//! ```

pub mod chain;
pub mod chunk;
pub mod chunks;
pub mod fields;

#[cfg(test)]
mod tests;

pub use chain::{ChainHook, MetarDecoder, default_strict, normalize, set_default_strict};
pub use chunk::{ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext};
pub use fields::ChunkFields;
