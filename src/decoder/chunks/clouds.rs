//! Cloud layers or a clear-sky sentinel
//!
//! Required unless CAVOK was reported, in which case a missing cloud group is
//! expected and yields no layers.

use crate::constants::{
    CLOUD_AMOUNT_PATTERN, CLOUD_HEIGHT_FACTOR, CLOUD_HEIGHT_PATTERN, CLOUD_TYPE_PATTERN,
    MAX_CLOUD_LAYERS, NO_CLOUD_PATTERN,
};
use crate::decoder::chunk::{
    ChunkDecoder, ChunkOutcome, ChunkRole, DecodeContext, after_match, compile, group,
};
use crate::decoder::fields::ChunkFields;
use crate::error::{ChunkDecodeError, ChunkErrorKind};
use crate::models::{CloudAmount, CloudLayer, CloudType, Unit, Value, lowest_layer};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Amounts that make up the derived ceiling
pub const CEILING_AMOUNTS: [CloudAmount; 3] = [
    CloudAmount::Broken,
    CloudAmount::Overcast,
    CloudAmount::VerticalVisibility,
];

fn layer_pattern(index: usize) -> String {
    format!(
        "(?P<layer{index}>(?P<amount{index}>{CLOUD_AMOUNT_PATTERN})(?P<height{index}>{CLOUD_HEIGHT_PATTERN})(?P<type{index}>{CLOUD_TYPE_PATTERN})?)"
    )
}

static PATTERN: Lazy<Regex> = Lazy::new(|| {
    let further_layers: String = (2..=MAX_CLOUD_LAYERS)
        .map(|index| format!("(?: {})?", layer_pattern(index)))
        .collect();
    compile(&format!(
        "^(?:(?P<clear>{NO_CLOUD_PATTERN})|{}{further_layers}) ",
        layer_pattern(1)
    ))
});

#[derive(Debug, Default)]
pub struct CloudsDecoder;

impl CloudsDecoder {
    fn layer(captures: &Captures<'_>, index: usize) -> Option<CloudLayer> {
        let raw_value = group(captures, &format!("layer{index}"))?;
        let amount = CloudAmount::from_code(group(captures, &format!("amount{index}"))?);
        let base_height = group(captures, &format!("height{index}"))
            .and_then(|hundreds| hundreds.parse::<u32>().ok())
            .map(|hundreds| Value::new(f64::from(hundreds * CLOUD_HEIGHT_FACTOR), Unit::Feet));
        let cloud_type = group(captures, &format!("type{index}")).and_then(CloudType::from_code);

        Some(CloudLayer {
            amount,
            base_height,
            cloud_type,
            raw_value: raw_value.to_string(),
        })
    }

    fn layers(captures: &Captures<'_>) -> Vec<CloudLayer> {
        if let Some(clear) = group(captures, "clear") {
            return vec![CloudLayer {
                amount: CloudAmount::from_code(clear),
                base_height: None,
                cloud_type: None,
                raw_value: clear.to_string(),
            }];
        }

        (1..=MAX_CLOUD_LAYERS)
            .filter_map(|index| Self::layer(captures, index))
            .collect()
    }
}

impl ChunkDecoder for CloudsDecoder {
    fn role(&self) -> ChunkRole {
        ChunkRole::Clouds
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
            if context.with_cavok {
                return Ok(ChunkOutcome::untouched(
                    ChunkFields::Clouds {
                        layers: Vec::new(),
                        ceiling: None,
                    },
                    remaining,
                ));
            }
            return Err(self.error(ChunkErrorKind::CloudsBadFormat, remaining));
        };

        let layers = Self::layers(&captures);
        let ceiling = lowest_layer(&layers, &CEILING_AMOUNTS).cloned();

        Ok(ChunkOutcome::new(
            ChunkFields::Clouds { layers, ceiling },
            after_match(&captures, remaining),
        ))
    }
}
