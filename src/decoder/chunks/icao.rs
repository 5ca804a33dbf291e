//! Four-character station identifier

use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"^(?P<icao>[A-Z0-9]{4}) "));

#[derive(Debug, Default)]
pub struct IcaoDecoder;

impl ChunkDecoder for IcaoDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::Icao
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
            .ok_or_else(|| self.error(ChunkErrorKind::IcaoNotFound, remaining))?;

        let icao = group(&captures, "icao")
            .ok_or_else(|| self.error(ChunkErrorKind::IcaoNotFound, remaining))?;

        Ok(ChunkOutcome::new(
            ChunkFields::Icao(icao.to_string()),
            after_match(&captures, remaining),
        ))
    }
}
