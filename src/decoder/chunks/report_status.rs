//! Report status word (`AUTO`, `NIL`, or any other three-letter word)

use crate::constants::{AUTO_STATUS, NIL_STATUS};
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::ReportStatus;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"^(?P<status>[A-Z]+) "));

#[derive(Debug, Default)]
pub struct ReportStatusDecoder;

impl ChunkDecoder for ReportStatusDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::ReportStatus
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
            return Ok(ChunkOutcome::untouched(ChunkFields::ReportStatus(None), remaining));
        };

        let status = group(&captures, "status").unwrap_or_default();
        if status.len() != 3 && status != AUTO_STATUS {
            return Err(self.error(ChunkErrorKind::InvalidReportStatus, remaining));
        }

        let rest = after_match(&captures, remaining);
        if status == NIL_STATUS && !rest.trim().is_empty() {
            return Err(self.error(ChunkErrorKind::InformationAfterNil, remaining));
        }

        Ok(ChunkOutcome::new(
            ChunkFields::ReportStatus(Some(ReportStatus::from_code(status))),
            rest,
        ))
    }
}
