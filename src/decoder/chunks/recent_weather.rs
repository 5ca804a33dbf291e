//! Recent weather (`RE` followed by one phenomenon without intensity)

use super::present_weather::{phenomenon_from, phenomenon_pattern};
use crate::decoder::chunk::{ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile};
use crate::decoder::fields::ChunkFields;
use crate::error::ChunkDecodeError;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(&format!("^RE{} ", phenomenon_pattern("recent", false))));

#[derive(Debug, Default)]
pub struct RecentWeatherDecoder;

impl ChunkDecoder for RecentWeatherDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::RecentWeather
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
            return Ok(ChunkOutcome::untouched(ChunkFields::RecentWeather(None), remaining));
        };

        Ok(ChunkOutcome::new(
            ChunkFields::RecentWeather(phenomenon_from(&captures, "recent")),
            after_match(&captures, remaining),
        ))
    }
}
