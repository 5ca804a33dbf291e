//! Decoder chain orchestration
//!
//! [`MetarDecoder`] owns the ordered chunk decoders and runs a report through
//! them. Each decode call is self-contained: the remaining text, the report
//! under construction and the CAVOK context all live on the stack of
//! [`MetarDecoder::decode_with_mode`], so one decoder can be shared between
//! threads without locking.

use crate::config::DecoderConfig;
use crate::constants::REPORT_TERMINATOR;
use crate::decoder::chunk::{ChunkDecoder, ChunkRole, DecodeContext};
use crate::decoder::chunks::{VisibilityDecoder, standard_chain};
use crate::error::{ChunkDecodeError, DecodingException, Disposition};
use crate::models::{DecodeTermination, DecodedMetar};
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use std::time::Duration;
use tracing::{debug, trace};

static DEFAULT_STRICT: OnceCell<bool> = OnceCell::new();

/// Fix the strictness used by [`MetarDecoder::decode`] when the decoder's
/// configuration leaves it open
///
/// Can be set once per process.
pub fn set_default_strict(strict: bool) -> Result<()> {
    DEFAULT_STRICT
        .set(strict)
        .map_err(|_| Error::DefaultStrictnessAlreadySet {
            current: default_strict(),
        })
}

/// Process-wide default strictness, lenient unless set
pub fn default_strict() -> bool {
    DEFAULT_STRICT.get().copied().unwrap_or(false)
}

/// Action run after a decoder with a given role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainHook {
    /// Stop the chain when the report status is NIL
    StopOnNil,
    /// Copy the report's CAVOK flag into the decode context
    CaptureCavok,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop(DecodeTermination),
}

/// Normalize a raw report line for decoding
///
/// Upper-cases, trims, drops one trailing `=`, collapses whitespace runs and
/// appends the single trailing space every chunk pattern expects.
pub fn normalize(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let trimmed = upper.trim();
    let trimmed = trimmed.strip_suffix(REPORT_TERMINATOR).unwrap_or(trimmed);

    let mut normalized = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    normalized.push(' ');
    normalized
}

/// Chain-of-responsibility METAR decoder
#[derive(Debug)]
pub struct MetarDecoder {
    chain: Vec<Box<dyn ChunkDecoder>>,
    hooks: Vec<(ChunkRole, ChainHook)>,
    match_budget: Duration,
    strict: Option<bool>,
}

impl Default for MetarDecoder {
    fn default() -> Self {
        Self::with_decoders(
            standard_chain(VisibilityDecoder::default()),
            &DecoderConfig::default(),
        )
    }
}

impl MetarDecoder {
    /// Standard chain with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard chain built from a validated configuration
    pub fn from_config(config: &DecoderConfig) -> Result<Self> {
        config.validate()?;

        let visibility = VisibilityDecoder::new(
            config.metric_unlimited_visibility_m,
            config.imperial_unlimited_visibility_sm,
        );
        Ok(Self::with_decoders(standard_chain(visibility), config))
    }

    /// Custom decoder order with the standard hooks
    ///
    /// Hooks follow decoder roles, so they keep working when decoders are
    /// reordered, removed or added.
    pub fn with_decoders(chain: Vec<Box<dyn ChunkDecoder>>, config: &DecoderConfig) -> Self {
        Self {
            chain,
            hooks: vec![
                (ChunkRole::ReportStatus, ChainHook::StopOnNil),
                (ChunkRole::Visibility, ChainHook::CaptureCavok),
            ],
            match_budget: config.match_budget(),
            strict: config.strict,
        }
    }

    /// Register an extra hook after decoders with `role`
    pub fn with_hook(mut self, role: ChunkRole, hook: ChainHook) -> Self {
        self.hooks.push((role, hook));
        self
    }

    /// Roles of the chain, in order
    pub fn roles(&self) -> Vec<ChunkRole> {
        self.chain.iter().map(|decoder| decoder.role()).collect()
    }

    /// Strictness used by [`decode`](Self::decode)
    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or_else(default_strict)
    }

    /// Decode using the configured or process-wide strictness
    pub fn decode(&self, raw: &str) -> DecodedMetar {
        self.decode_with_mode(raw, self.is_strict())
    }

    /// Decode, stopping at the first malformed chunk
    pub fn decode_strict(&self, raw: &str) -> DecodedMetar {
        self.decode_with_mode(raw, true)
    }

    /// Decode, recovering from malformed chunks where possible
    pub fn decode_lenient(&self, raw: &str) -> DecodedMetar {
        self.decode_with_mode(raw, false)
    }

    /// Decode one report line
    ///
    /// Never fails: chunk failures are recorded on the returned report, which
    /// also tells how the chain ended.
    pub fn decode_with_mode(&self, raw: &str, strict: bool) -> DecodedMetar {
        let normalized = normalize(raw);
        trace!("Decoding {:?} (strict={})", normalized, strict);

        let mut report = DecodedMetar::new(&normalized);
        let mut context = DecodeContext::new(self.match_budget);
        let mut remaining = normalized;

        for decoder in &self.chain {
            let role = decoder.role();

            match decoder.parse(&remaining, &context) {
                Ok(outcome) => {
                    debug!("{} chunk decoded, {} chars left", role, outcome.remaining.len());
                    outcome.fields.apply(&mut report);
                    remaining = outcome.remaining;
                }
                Err(error) if strict => {
                    debug!("{} aborted strict decoding", error);
                    report.add_decoding_exception(DecodingException::new(
                        error,
                        Disposition::StrictAbort,
                    ));
                    report.termination = DecodeTermination::StrictAbort;
                    break;
                }
                Err(error) => {
                    remaining = self.recover(decoder.as_ref(), error, &context, &mut report);
                }
            }

            if let Flow::Stop(termination) = self.run_hooks(role, &report, &mut context) {
                debug!("Chain stopped after {} chunk: {:?}", role, termination);
                report.termination = termination;
                break;
            }
        }

        report
    }

    /// Retry a failed decoder once with its first token discarded
    ///
    /// Returns the text the chain continues from.
    fn recover(
        &self,
        decoder: &dyn ChunkDecoder,
        error: ChunkDecodeError,
        context: &DecodeContext,
        report: &mut DecodedMetar,
    ) -> String {
        let retry = error
            .next_remaining
            .as_deref()
            .map(|skipped| decoder.parse(skipped, context));

        match retry {
            Some(Ok(outcome)) => {
                debug!("{} recovered by skipping one token", error);
                outcome.fields.apply(report);
                report.add_decoding_exception(DecodingException::new(
                    error,
                    Disposition::RecoveredViaSkip,
                ));
                outcome.remaining
            }
            Some(Err(_)) | None => {
                debug!("{} left undecoded", error);
                let resume = error.resume_text().to_string();
                report.add_decoding_exception(DecodingException::new(error, Disposition::Malformed));
                resume
            }
        }
    }

    fn run_hooks(&self, role: ChunkRole, report: &DecodedMetar, context: &mut DecodeContext) -> Flow {
        for (_, hook) in self.hooks.iter().filter(|(hook_role, _)| *hook_role == role) {
            match hook {
                ChainHook::StopOnNil if report.is_nil() => {
                    return Flow::Stop(DecodeTermination::NilExit);
                }
                ChainHook::StopOnNil => {}
                ChainHook::CaptureCavok => context.with_cavok = report.cavok,
            }
        }
        Flow::Continue
    }
}
