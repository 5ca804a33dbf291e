//! QNH (`Qnnnn`, hPa) or altimeter setting (`Annnn`, hundredths of inHg)

use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group, matched,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::{Pressure, PressureTag};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<tag>Q|A)(?P<value>////|[0-9]{4}) "));

#[derive(Debug, Default)]
pub struct PressureDecoder;

impl ChunkDecoder for PressureDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::Pressure
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
            .ok_or_else(|| self.error(ChunkErrorKind::PressureNotFound, remaining))?;

        let tag = match group(&captures, "tag") {
            Some("A") => PressureTag::Altimeter,
            _ => PressureTag::Qnh,
        };

        // `////` means not reported
        let pressure = group(&captures, "value")
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(|reported| Pressure::new(tag, reported, matched(&captures)));

        Ok(ChunkOutcome::new(
            ChunkFields::Pressure(pressure),
            after_match(&captures, remaining),
        ))
    }
}
