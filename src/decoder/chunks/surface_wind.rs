//! Surface wind group (`dddff(Gff)unit` with optional `dddVddd`)

use crate::constants::{
    MAX_WIND_DIRECTION, WIND_DIRECTION_PATTERN, WIND_SPEED_PATTERN, WIND_UNIT_PATTERN,
};
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group, matched,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::{SurfaceWind, Unit, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^(?P<direction>{WIND_DIRECTION_PATTERN})(?P<above>P)?(?P<speed>{WIND_SPEED_PATTERN})(?:G(?P<gust_above>P)?(?P<gust>[0-9]{{2,3}}))?(?P<unit>{WIND_UNIT_PATTERN})(?: (?P<var_min>[0-9]{{3}})V(?P<var_max>[0-9]{{3}}))? "
    ))
});

#[derive(Debug, Default)]
pub struct SurfaceWindDecoder;

fn speed_unit(code: &str) -> Unit {
    match code {
        "MPS" => Unit::MeterPerSecond,
        "KPH" => Unit::KilometerPerHour,
        _ => Unit::Knot,
    }
}

/// Whole degrees, `None` for missing digits
fn degrees(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

impl ChunkDecoder for SurfaceWindDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::SurfaceWind
    }

    fn pattern(&self) -> &Regex {
        &PATTERN
    }

    fn parse(
        &self,
        remaining: &str,
        context: &DecodeContext,
    ) -> Result<ChunkOutcome, ChunkDecodeError> {
        let captures = self
            .capture(remaining, context)
            .ok_or_else(|| self.error(ChunkErrorKind::SurfaceWindBadFormat, remaining))?;

        let direction = group(&captures, "direction").unwrap_or_default();
        let speed = group(&captures, "speed").unwrap_or_default();
        if direction == "///" && speed == "//" {
            return Err(self.error(ChunkErrorKind::NoSurfaceWindMeasured, remaining));
        }

        let unit = speed_unit(group(&captures, "unit").unwrap_or_default());
        let variable_direction = direction == "VRB";

        let mean_direction = match degrees(direction) {
            Some(value) if value > MAX_WIND_DIRECTION => {
                return Err(self.error(ChunkErrorKind::InvalidWindDirection, remaining));
            }
            Some(value) => Some(Value::new(f64::from(value), Unit::Degree)),
            None => None,
        };

        let direction_variations = match (group(&captures, "var_min"), group(&captures, "var_max")) {
            (Some(min), Some(max)) => {
                let (min, max) = (degrees(min), degrees(max));
                match (min, max) {
                    (Some(min), Some(max))
                        if min <= MAX_WIND_DIRECTION && max <= MAX_WIND_DIRECTION =>
                    {
                        Some((
                            Value::new(f64::from(min), Unit::Degree),
                            Value::new(f64::from(max), Unit::Degree),
                        ))
                    }
                    _ => {
                        return Err(self.error(
                            ChunkErrorKind::InvalidWindDirectionVariations,
                            remaining,
                        ));
                    }
                }
            }
            _ => None,
        };

        let mean_speed = speed
            .parse::<u32>()
            .ok()
            .map(|value| Value::new(f64::from(value), unit));
        let speed_variations = group(&captures, "gust")
            .and_then(|gust| gust.parse::<u32>().ok())
            .map(|value| Value::new(f64::from(value), unit));

        let raw_value = matched(&captures).to_string();

        let wind = SurfaceWind {
            mean_direction,
            variable_direction,
            mean_speed,
            speed_variations,
            is_above: group(&captures, "above").is_some(),
            gust_is_above: group(&captures, "gust_above").is_some(),
            direction_variations,
            speed_unit: unit,
            raw_value,
        };

        Ok(ChunkOutcome::new(
            ChunkFields::SurfaceWind(wind),
            after_match(&captures, remaining),
        ))
    }
}
