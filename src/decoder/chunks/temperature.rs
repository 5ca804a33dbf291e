//! Air and dew point temperature (`TT/TT`, `M` for negative)

use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::ChunkDecodeError;
use crate::models::parse_signed;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<air>M?[0-9]{2})?/(?P<dew_point>M?[0-9]{2})? "));

#[derive(Debug, Default)]
pub struct TemperatureDecoder;

impl ChunkDecoder for TemperatureDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::Temperature
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
                ChunkFields::Temperature {
                    air: None,
                    dew_point: None,
                },
                remaining,
            ));
        };

        Ok(ChunkOutcome::new(
            ChunkFields::Temperature {
                air: group(&captures, "air").and_then(parse_signed),
                dew_point: group(&captures, "dew_point").and_then(parse_signed),
            },
            after_match(&captures, remaining),
        ))
    }
}
