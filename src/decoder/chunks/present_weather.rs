//! Present weather, up to three phenomena groups
//!
//! Each group is `[intensity][characteristics][type]{0,3}` followed by a
//! space. Every group is optional, so the decoder can match nothing at all and
//! leave the remaining text untouched.

use crate::constants::{
    CHARACTERISTICS_PATTERN, INTENSITY_PATTERN, MISSING_WEATHER_SENTINEL, WEATHER_TYPE_PATTERN,
};
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::ChunkDecodeError;
use crate::models::WeatherPhenomenon;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Number of phenomena groups the decoder reads
const PHENOMENA_GROUPS: usize = 3;

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let groups: String = (1..=PHENOMENA_GROUPS)
        .map(|index| format!("(?:{} )?", phenomenon_pattern(&format!("pw{index}"), true)))
        .collect();
    compile(&format!("^{groups}"))
});

/// Pattern for one phenomenon with group names prefixed by `prefix`
///
/// The whole phenomenon is captured as `<prefix>`; parts are
/// `<prefix>_intensity`, `<prefix>_characteristics` and `<prefix>_type1..3`.
pub(crate) fn phenomenon_pattern(prefix: &str, with_intensity: bool) -> String {
    let intensity = if with_intensity {
        format!("(?P<{prefix}_intensity>{INTENSITY_PATTERN})?")
    } else {
        String::new()
    };
    let types: String = (1..=WeatherPhenomenon::MAX_TYPES)
        .map(|index| format!("(?P<{prefix}_type{index}>{WEATHER_TYPE_PATTERN})?"))
        .collect();

    format!(
        "(?P<{prefix}>{intensity}(?P<{prefix}_characteristics>{CHARACTERISTICS_PATTERN})?{types})"
    )
}

/// Build the phenomenon captured under `prefix`, if any
pub(crate) fn phenomenon_from(captures: &Captures<'_>, prefix: &str) -> Option<WeatherPhenomenon> {
    let raw_value = group(captures, prefix)?;

    let mut weather = WeatherPhenomenon::new(
        group(captures, &format!("{prefix}_intensity")).map(str::to_string),
        group(captures, &format!("{prefix}_characteristics")).map(str::to_string),
        raw_value,
    );
    for index in 1..=WeatherPhenomenon::MAX_TYPES {
        if let Some(code) = group(captures, &format!("{prefix}_type{index}")) {
            weather.add_type(code);
        }
    }

    Some(weather)
}

#[derive(Debug, Default)]
pub struct PresentWeatherDecoder;

impl ChunkDecoder for PresentWeatherDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::PresentWeather
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
                ChunkFields::PresentWeather(Vec::new()),
                remaining,
            ));
        };

        let phenomena = (1..=PHENOMENA_GROUPS)
            .filter_map(|index| phenomenon_from(&captures, &format!("pw{index}")))
            .filter(|weather| {
                weather.types().first().map(String::as_str) != Some(MISSING_WEATHER_SENTINEL)
            })
            .collect();

        Ok(ChunkOutcome::new(
            ChunkFields::PresentWeather(phenomena),
            after_match(&captures, remaining),
        ))
    }
}
