//! Runway visual range, one `Rrr/...` entry per runway

use super::runway_qfu_is_valid;
use crate::constants::RUNWAY_PATTERN;
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group, matched,
    timed_captures,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::{RunwayVisualRange, Tendency, Unit, Value};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

fn entry_pattern() -> String {
    format!(
        r"R(?P<runway>{RUNWAY_PATTERN})/(?:(?P<min_marker>[PM])?(?P<min>[0-9]{{4}})V)?(?P<marker>[PM])?(?P<range>[0-9]{{4}})(?P<feet>FT)?/?(?P<tendency>[UDN])?"
    )
}

/// Whole run of consecutive entries
static PATTERN: Lazy<Regex> = Lazy::new(|| compile(&format!(r"^(?:{} )+", entry_pattern())));

/// One entry at the start of the run
static ENTRY: Lazy<Regex> = Lazy::new(|| compile(&format!(r"^{} ", entry_pattern())));

#[derive(Debug, Default)]
pub struct RunwayVisualRangeDecoder;

impl RunwayVisualRangeDecoder {
    fn reading(entry: &Captures<'_>) -> RunwayVisualRange {
        let unit = if group(entry, "feet").is_some() {
            Unit::Feet
        } else {
            Unit::Meter
        };
        let distance = |name: &str| {
            group(entry, name)
                .and_then(|digits| digits.parse::<u32>().ok())
                .map(|value| Value::new(f64::from(value), unit))
        };

        let minimum = distance("min");
        let range = distance("range");
        let (visual_range, visual_range_interval) = match (minimum, range) {
            (Some(min), Some(max)) => (None, Some((min, max))),
            (None, single) => (single, None),
            (Some(_), None) => (None, None),
        };

        let marker = group(entry, "marker");
        let min_marker = group(entry, "min_marker");
        RunwayVisualRange {
            runway: group(entry, "runway").unwrap_or_default().to_string(),
            visual_range,
            variable: minimum.is_some(),
            visual_range_interval,
            is_greater_than: marker == Some("P"),
            is_less_than: marker == Some("M"),
            minimum_is_greater_than: min_marker == Some("P"),
            minimum_is_less_than: min_marker == Some("M"),
            past_tendency: group(entry, "tendency").and_then(Tendency::from_code),
            raw_value: matched(entry).to_string(),
        }
    }
}

impl ChunkDecoder for RunwayVisualRangeDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::RunwayVisualRange
    }

    fn pattern(&self) -> &Regex {
        &PATTERN
    }

    fn parse(
        &self,
        remaining: &str,
        context: &DecodeContext,
    ) -> Result<ChunkOutcome, ChunkDecodeError> {
        let Some(captures) = self.capture(remaining, context) else {
            return Ok(ChunkOutcome::untouched(
                ChunkFields::RunwayVisualRange(Vec::new()),
                remaining,
            ));
        };

        let mut run = captures.get(0).map_or("", |whole| whole.as_str());
        let mut readings = Vec::new();

        while let Some(entry) = timed_captures(&ENTRY, run, context.match_budget, self.role()) {
            if !runway_qfu_is_valid(group(&entry, "runway").unwrap_or_default()) {
                return Err(self.error(ChunkErrorKind::InvalidRunwayVisualRangeRunway, remaining));
            }

            readings.push(Self::reading(&entry));
            run = after_match(&entry, run);
        }

        Ok(ChunkOutcome::new(
            ChunkFields::RunwayVisualRange(readings),
            after_match(&captures, remaining),
        ))
    }
}
