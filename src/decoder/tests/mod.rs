//! Tests for the decoding engine
//!
//! Chunk decoders are exercised one by one, then the whole chain.

pub mod runway_tests;
pub mod surface_wind_tests;
pub mod weather_tests;

// Test helper functions and fixtures
use crate::decoder::chunk::{ChunkDecoder, ChunkOutcome, DecodeContext};
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use std::time::Duration;

/// Fully conforming US report used across tests
pub const KJFK_REPORT: &str = "KJFK 261651Z 18010KT 10SM FEW250 24/18 A3000";

/// Context with a generous match budget and no CAVOK
pub fn test_context() -> DecodeContext {
    DecodeContext::new(Duration::from_secs(1))
}

/// Context as seen by decoders after a CAVOK visibility group
pub fn cavok_context() -> DecodeContext {
    DecodeContext {
        with_cavok: true,
        ..test_context()
    }
}

/// Parse `text` and fail the test on a chunk error
pub fn parse_ok(decoder: &dyn ChunkDecoder, text: &str) -> ChunkOutcome {
    decoder
        .parse(text, &test_context())
        .unwrap_or_else(|error| panic!("{text:?} should decode: {error}"))
}

/// Parse `text` and fail the test when it decodes
pub fn parse_err(decoder: &dyn ChunkDecoder, text: &str) -> ChunkDecodeError {
    match decoder.parse(text, &test_context()) {
        Ok(outcome) => panic!("{text:?} should not decode, got {:?}", outcome.fields),
        Err(error) => error,
    }
}

/// Assert the error kind and that the untouched text is kept
pub fn assert_chunk_error(error: &ChunkDecodeError, kind: ChunkErrorKind, text: &str) {
    assert_eq!(error.kind, kind);
    assert_eq!(error.remaining, text);
}
