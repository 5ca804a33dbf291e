//! Wind shear on all runways or on up to three listed runways

use super::runway_qfu_is_valid;
use crate::constants::RUNWAY_PATTERN;
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::WindShear;
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_SHEAR_RUNWAYS: usize = 3;

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let runway = |index: usize| format!("WS R(?:WY)?(?P<runway{index}>{RUNWAY_PATTERN})");
    let further: String = (2..=MAX_SHEAR_RUNWAYS)
        .map(|index| format!("(?: {})?", runway(index)))
        .collect();
    compile(&format!("^(?:(?P<all>WS ALL RWY)|{}{further}) ", runway(1)))
});

#[derive(Debug, Default)]
pub struct WindShearDecoder;

impl ChunkDecoder for WindShearDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::WindShear
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
            return Ok(ChunkOutcome::untouched(ChunkFields::WindShear(None), remaining));
        };

        let shear = if group(&captures, "all").is_some() {
            WindShear::AllRunways
        } else {
            let mut runways = Vec::new();
            for index in 1..=MAX_SHEAR_RUNWAYS {
                let Some(runway) = group(&captures, &format!("runway{index}")) else {
                    continue;
                };
                if !runway_qfu_is_valid(runway) {
                    return Err(self.error(ChunkErrorKind::InvalidWindShearRunway, remaining));
                }
                runways.push(runway.to_string());
            }
            WindShear::Runways(runways)
        };

        Ok(ChunkOutcome::new(
            ChunkFields::WindShear(Some(shear)),
            after_match(&captures, remaining),
        ))
    }
}
