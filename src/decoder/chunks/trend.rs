//! Trend forecast (`NOSIG`, `BECMG`, `TEMPO`) with optional time markers
//!
//! Sub-groups are captured as raw text, each separated by a single space.
//! Anything after the first trend group, such as a second trend or remarks,
//! is left in the remaining text.

use crate::constants::{
    CHARACTERISTICS_PATTERN, CLOUD_AMOUNT_PATTERN, CLOUD_HEIGHT_PATTERN, CLOUD_TYPE_PATTERN,
    INTENSITY_PATTERN, NO_CLOUD_PATTERN, TREND_KIND_PATTERN, WEATHER_TYPE_PATTERN,
    WIND_DIRECTION_PATTERN, WIND_SPEED_PATTERN, WIND_UNIT_PATTERN,
};
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group, matched,
};
use crate::decoder::fields::ChunkFields;
use crate::error::ChunkDecodeError;
use crate::models::{TrendForecast, TrendKind};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let wind = format!(
        "(?:{WIND_DIRECTION_PATTERN})P?(?:{WIND_SPEED_PATTERN})(?:GP?[0-9]{{2,3}})?(?:{WIND_UNIT_PATTERN})"
    );
    let visibility = "[0-9]{4}|CAVOK";
    let weather = format!(
        "NSW|(?:{INTENSITY_PATTERN})?(?:(?:{CHARACTERISTICS_PATTERN})(?:{WEATHER_TYPE_PATTERN}){{0,3}}|(?:{WEATHER_TYPE_PATTERN}){{1,3}})"
    );
    let layer = format!(
        "(?:{CLOUD_AMOUNT_PATTERN})(?:{CLOUD_HEIGHT_PATTERN})(?:{CLOUD_TYPE_PATTERN})?"
    );
    let clouds = format!("{NO_CLOUD_PATTERN}|{layer}(?: {layer}){{0,3}}");

    compile(&format!(
        concat!(
            "^(?:TREND )?(?P<kind>{kind})",
            "(?: AT(?P<at>[0-9]{{4}}))?(?: FM(?P<from>[0-9]{{4}}))?(?: TL(?P<until>[0-9]{{4}}))?",
            "(?: (?P<wind>{wind}))?(?: (?P<visibility>{visibility}))?",
            "(?: (?P<weather>{weather}))?(?: (?P<clouds>{clouds}))? "
        ),
        kind = TREND_KIND_PATTERN,
        wind = wind,
        visibility = visibility,
        weather = weather,
        clouds = clouds,
    ))
});

#[derive(Debug, Default)]
pub struct TrendDecoder;

impl ChunkDecoder for TrendDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::Trend
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
            return Ok(ChunkOutcome::untouched(ChunkFields::Trend(None), remaining));
        };
        let Some(kind) = group(&captures, "kind").and_then(TrendKind::from_code) else {
            return Ok(ChunkOutcome::untouched(ChunkFields::Trend(None), remaining));
        };

        let text = |name: &str| group(&captures, name).map(str::to_string);
        let trend = TrendForecast {
            kind,
            at_time: text("at"),
            from_time: text("from"),
            until_time: text("until"),
            surface_wind: text("wind"),
            prevailing_visibility: text("visibility"),
            weather_codes: text("weather"),
            clouds: text("clouds"),
            raw_value: matched(&captures).to_string(),
        };

        Ok(ChunkOutcome::new(
            ChunkFields::Trend(Some(trend)),
            after_match(&captures, remaining),
        ))
    }
}
