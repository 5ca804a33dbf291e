//! Shared contract for chunk decoders
//!
//! A chunk decoder owns one grammar production of a METAR report. It matches
//! an anchored pattern against the start of the remaining text and hands back
//! the typed fields it extracted together with the text left after its match.

use crate::constants::PATTERN_SIZE_LIMIT;
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{trace, warn};

/// Grammar production owned by a chunk decoder
///
/// Chain hooks are keyed by role, so a decoder is identified by what it
/// decodes rather than by its concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkRole {
    ReportType,
    Icao,
    DateTime,
    ReportStatus,
    SurfaceWind,
    Visibility,
    RunwayVisualRange,
    PresentWeather,
    Clouds,
    Temperature,
    Pressure,
    RecentWeather,
    WindShear,
    Trend,
}

impl ChunkRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkRole::ReportType => "report_type",
            ChunkRole::Icao => "icao",
            ChunkRole::DateTime => "date_time",
            ChunkRole::ReportStatus => "report_status",
            ChunkRole::SurfaceWind => "surface_wind",
            ChunkRole::Visibility => "visibility",
            ChunkRole::RunwayVisualRange => "runway_visual_range",
            ChunkRole::PresentWeather => "present_weather",
            ChunkRole::Clouds => "clouds",
            ChunkRole::Temperature => "temperature",
            ChunkRole::Pressure => "pressure",
            ChunkRole::RecentWeather => "recent_weather",
            ChunkRole::WindShear => "wind_shear",
            ChunkRole::Trend => "trend",
        }
    }
}

impl fmt::Display for ChunkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call state handed to every chunk decoder
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext {
    /// CAVOK was reported by the visibility chunk
    pub with_cavok: bool,
    /// Upper bound for a single pattern match
    pub match_budget: Duration,
}

impl DecodeContext {
    pub fn new(match_budget: Duration) -> Self {
        Self {
            with_cavok: false,
            match_budget,
        }
    }
}

/// Successful parse of one chunk
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkOutcome {
    pub fields: ChunkFields,
    pub remaining: String,
}

impl ChunkOutcome {
    pub fn new(fields: ChunkFields, remaining: impl Into<String>) -> Self {
        Self {
            fields,
            remaining: remaining.into(),
        }
    }

    /// Outcome for a decoder whose optional production is absent
    pub fn untouched(fields: ChunkFields, remaining: &str) -> Self {
        Self::new(fields, remaining)
    }
}

/// One grammar production of the report
///
/// Implementations are immutable after construction and are shared between
/// threads by the chain.
pub trait ChunkDecoder: Send + Sync + fmt::Debug {
    /// Production this decoder owns
    fn role(&self) -> ChunkRole;

    /// Anchored pattern matched against the remaining text
    fn pattern(&self) -> &Regex;

    /// Decode the chunk at the start of `remaining`
    fn parse(
        &self,
        remaining: &str,
        context: &DecodeContext,
    ) -> Result<ChunkOutcome, ChunkDecodeError>;

    /// Match the pattern within the context's budget
    ///
    /// A zero-length match is still a match; callers decide from the named
    /// groups whether anything was found.
    fn capture<'t>(&self, remaining: &'t str, context: &DecodeContext) -> Option<Captures<'t>> {
        timed_captures(self.pattern(), remaining, context.match_budget, self.role())
    }

    /// Build a failure for this decoder at `remaining`
    fn error(&self, kind: ChunkErrorKind, remaining: &str) -> ChunkDecodeError {
        ChunkDecodeError::new(self.role(), kind, remaining)
    }
}

/// Compile a chunk pattern
///
/// Patterns are compile-time literals, so a failure here is a programming
/// error caught by the decoder unit tests.
pub fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .unwrap_or_else(|error| panic!("invalid chunk pattern {pattern:?}: {error}"))
}

/// Run `pattern` against `remaining`, discarding matches that overran `budget`
///
/// The regex engine matches in linear time, so an overrun means the host is
/// starved rather than the pattern backtracking. It is still reported as a
/// non-match so that decoding latency stays bounded per chunk.
pub fn timed_captures<'t>(
    pattern: &Regex,
    remaining: &'t str,
    budget: Duration,
    role: ChunkRole,
) -> Option<Captures<'t>> {
    let started = Instant::now();
    let captures = pattern.captures(remaining);
    let elapsed = started.elapsed();

    if elapsed > budget {
        warn!(
            "{} pattern match took {:?}, over the {:?} budget; treating as no match",
            role, elapsed, budget
        );
        return None;
    }

    trace!("{} pattern matched={} in {:?}", role, captures.is_some(), elapsed);
    captures
}

/// Text left after the whole match
pub fn after_match<'t>(captures: &Captures<'t>, remaining: &'t str) -> &'t str {
    captures
        .get(0)
        .map_or(remaining, |whole| &remaining[whole.end()..])
}

/// Whole matched text without its trailing separator
pub fn matched<'t>(captures: &Captures<'t>) -> &'t str {
    captures.get(0).map_or("", |whole| whole.as_str()).trim_end()
}

/// Named group text, `None` when the group did not take part or is empty
pub fn group<'t>(captures: &Captures<'t>, name: &str) -> Option<&'t str> {
    captures
        .name(name)
        .map(|found| found.as_str())
        .filter(|text| !text.is_empty())
}

/// Discard the first whitespace-delimited token
///
/// Text without a separator after its first character is returned unchanged.
pub fn consume_one_chunk(remaining: &str) -> &str {
    match remaining.find(' ') {
        Some(index) if index > 0 => &remaining[index + 1..],
        _ => remaining,
    }
}
