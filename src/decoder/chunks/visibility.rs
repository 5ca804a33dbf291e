//! Prevailing visibility: `CAVOK`, metric, US statute miles, or `////`
//!
//! The decoder is the only one carrying settings: the metric and imperial
//! values at or above which the prevailing visibility is reported as
//! unlimited.

use crate::constants::{
    COMPASS_DIRECTION_PATTERN, DEFAULT_IMPERIAL_UNLIMITED_VISIBILITY_SM,
    DEFAULT_METRIC_UNLIMITED_VISIBILITY_M,
};
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group, matched,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::{Unit, Value, Visibility};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let metric = format!(
        r"(?P<metric>[0-9]{{4}})(?P<ndv>NDV)?(?: (?P<minimum>[0-9]{{4}})(?P<minimum_direction>{COMPASS_DIRECTION_PATTERN})?)?"
    );
    let imperial = r"(?P<less_than>M)?(?P<whole>[0-9]{0,2}) ?(?:(?P<numerator>[1357])/(?P<denominator>2|4|8|16))?SM";
    compile(&format!(
        r"^(?:(?P<cavok>CAVOK)|{metric}|(?P<imperial>{imperial})|(?P<missing>////)) "
    ))
});

#[derive(Debug, Clone)]
pub struct VisibilityDecoder {
    metric_unlimited_m: f64,
    imperial_unlimited_sm: f64,
}

impl Default for VisibilityDecoder {
    fn default() -> Self {
        Self::new(
            DEFAULT_METRIC_UNLIMITED_VISIBILITY_M,
            DEFAULT_IMPERIAL_UNLIMITED_VISIBILITY_SM,
        )
    }
}

impl VisibilityDecoder {
    pub fn new(metric_unlimited_m: f64, imperial_unlimited_sm: f64) -> Self {
        Self {
            metric_unlimited_m,
            imperial_unlimited_sm,
        }
    }

    fn metric(&self, captures: &Captures<'_>, meters: &str) -> Visibility {
        let prevailing = meters.parse::<f64>().unwrap_or_default();
        let minimum = group(captures, "minimum").and_then(|raw| raw.parse::<f64>().ok());

        Visibility {
            prevailing_visibility: Some(Value::new(prevailing, Unit::Meter)),
            minimum_visibility: minimum.map(|meters| Value::new(meters, Unit::Meter)),
            minimum_visibility_direction: minimum
                .and(group(captures, "minimum_direction"))
                .map(str::to_string),
            is_ndv: group(captures, "ndv").is_some(),
            is_unlimited: prevailing >= self.metric_unlimited_m,
            raw_value: Some(matched(captures).to_string()),
            ..Visibility::default()
        }
    }

    fn imperial(&self, captures: &Captures<'_>) -> Visibility {
        let whole = group(captures, "whole")
            .and_then(|raw| raw.parse::<u32>().ok())
            .map_or(0.0, f64::from);

        let fraction = match (
            group(captures, "numerator").and_then(|raw| raw.parse::<u32>().ok()),
            group(captures, "denominator").and_then(|raw| raw.parse::<u32>().ok()),
        ) {
            (Some(numerator), Some(denominator)) if denominator != 0 => {
                f64::from(numerator) / f64::from(denominator)
            }
            _ => 0.0,
        };

        let miles = whole + fraction;
        Visibility {
            prevailing_visibility: Some(Value::new(miles, Unit::StatuteMile)),
            is_less_than: group(captures, "less_than").is_some(),
            is_unlimited: miles >= self.imperial_unlimited_sm,
            raw_value: Some(matched(captures).to_string()),
            ..Visibility::default()
        }
    }
}

impl ChunkDecoder for VisibilityDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::Visibility
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
            .ok_or_else(|| self.error(ChunkErrorKind::VisibilityBadFormat, remaining))?;

        let cavok = group(&captures, "cavok").is_some();
        let visibility = if cavok {
            // CAVOK implies 10 km or more
            Visibility {
                is_cavok: true,
                is_unlimited: true,
                raw_value: Some(matched(&captures).to_string()),
                ..Visibility::default()
            }
        } else if let Some(meters) = group(&captures, "metric") {
            self.metric(&captures, meters)
        } else if group(&captures, "imperial").is_some() {
            self.imperial(&captures)
        } else {
            Visibility {
                raw_value: Some(matched(&captures).to_string()),
                ..Visibility::default()
            }
        };

        Ok(ChunkOutcome::new(
            ChunkFields::Visibility { visibility, cavok },
            after_match(&captures, remaining),
        ))
    }
}
