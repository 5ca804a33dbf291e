//! Observation day and time (`ddhhmmZ`)

use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<day>[0-9]{2})(?P<hour>[0-9]{2})(?P<minute>[0-9]{2})Z "));

#[derive(Debug, Default)]
pub struct DateTimeDecoder;

impl DateTimeDecoder {
    fn in_range(day: u32, hour: u32, minute: u32) -> bool {
        (1..=31).contains(&day) && hour <= 23 && minute <= 59
    }
}

impl ChunkDecoder for DateTimeDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::DateTime
    }

    fn pattern(&self) -> &Regex {
        &PATTERN
    }

    fn parse(
        &self,
        remaining: &str,
        context: &DecodeContext,
    ) -> Result<ChunkOutcome, ChunkDecodeError> {
        let bad_format = || self.error(ChunkErrorKind::BadDayHourMinute, remaining);

        let captures = self.capture(remaining, context).ok_or_else(bad_format)?;
        let number = |name: &str| -> Result<u32, ChunkDecodeError> {
            group(&captures, name)
                .and_then(|digits| digits.parse().ok())
                .ok_or_else(bad_format)
        };

        let (day, hour, minute) = (number("day")?, number("hour")?, number("minute")?);
        if !Self::in_range(day, hour, minute) {
            return Err(self.error(ChunkErrorKind::InvalidDayHourMinuteRanges, remaining));
        }

        Ok(ChunkOutcome::new(
            ChunkFields::DateTime { day, hour, minute },
            after_match(&captures, remaining),
        ))
    }
}
