//! Optional `METAR` / `SPECI` header, possibly marked as a correction

use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::ChunkDecodeError;
use crate::models::ReportType;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"^(?P<type>(?:METAR|SPECI)(?: COR)?) "));

#[derive(Debug, Default)]
pub struct ReportTypeDecoder;

impl ChunkDecoder for ReportTypeDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::ReportType
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
            return Ok(ChunkOutcome::untouched(ChunkFields::ReportType(None), remaining));
        };

        let report_type = group(&captures, "type").and_then(ReportType::from_code);
        Ok(ChunkOutcome::new(
            ChunkFields::ReportType(report_type),
            after_match(&captures, remaining),
        ))
    }
}
