//! Tests for runway visual range and wind shear chunks

use super::*;
use crate::decoder::chunks::{RunwayVisualRangeDecoder, WindShearDecoder};
use crate::decoder::fields::ChunkFields;
use crate::models::{RunwayVisualRange, Tendency, Unit, Value, WindShear};

fn ranges(text: &str) -> (Vec<RunwayVisualRange>, String) {
    let outcome = parse_ok(&RunwayVisualRangeDecoder, text);
    match outcome.fields {
        ChunkFields::RunwayVisualRange(ranges) => (ranges, outcome.remaining),
        other => panic!("unexpected fields {other:?}"),
    }
}

#[test]
fn test_several_runways() {
    let (ranges, remaining) = ranges("R27L/0600U R09/P1500 FEW010 ");

    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].runway, "27L");
    assert_eq!(ranges[0].visual_range, Some(Value::new(600.0, Unit::Meter)));
    assert_eq!(ranges[0].past_tendency, Some(Tendency::Upward));
    assert!(!ranges[0].variable);
    assert_eq!(ranges[0].raw_value, "R27L/0600U");

    assert_eq!(ranges[1].runway, "09");
    assert!(ranges[1].is_greater_than);
    assert_eq!(ranges[1].visual_range, Some(Value::new(1500.0, Unit::Meter)));
    assert_eq!(ranges[1].past_tendency, None);

    assert_eq!(remaining, "FEW010 ");
}

#[test]
fn test_variable_range_in_feet() {
    let (ranges, _) = ranges("R24/1000V1500FT/D BR ");

    assert!(ranges[0].variable);
    assert_eq!(ranges[0].visual_range, None);
    assert_eq!(
        ranges[0].visual_range_interval,
        Some((Value::new(1000.0, Unit::Feet), Value::new(1500.0, Unit::Feet)))
    );
    assert_eq!(ranges[0].past_tendency, Some(Tendency::Downward));
}

#[test]
fn test_below_minimum_marker() {
    let (ranges, _) = ranges("R18/M0050 FG ");
    assert!(ranges[0].is_less_than);
    assert!(!ranges[0].is_greater_than);
    assert!(!ranges[0].minimum_is_less_than);
}

#[test]
fn test_interval_markers_stay_on_their_bound() {
    let (ranges, _) = ranges("R27/M0600V1000 R09/0800VP1500 FG ");

    assert_eq!(
        ranges[0].visual_range_interval,
        Some((Value::new(600.0, Unit::Meter), Value::new(1000.0, Unit::Meter)))
    );
    assert!(ranges[0].minimum_is_less_than);
    assert!(!ranges[0].is_less_than);
    assert!(!ranges[0].is_greater_than);

    assert!(ranges[1].is_greater_than);
    assert!(!ranges[1].minimum_is_greater_than);
    assert!(!ranges[1].minimum_is_less_than);
}

#[test]
fn test_no_runway_visual_range() {
    let (ranges, remaining) = ranges("FEW010 15/10 ");
    assert!(ranges.is_empty());
    assert_eq!(remaining, "FEW010 15/10 ");
}

#[test]
fn test_invalid_runway_number() {
    let error = parse_err(&RunwayVisualRangeDecoder, "R40/0600 FEW010 ");
    assert_chunk_error(
        &error,
        ChunkErrorKind::InvalidRunwayVisualRangeRunway,
        "R40/0600 FEW010 ",
    );
}

#[test]
fn test_wind_shear_all_runways() {
    let outcome = parse_ok(&WindShearDecoder, "WS ALL RWY NOSIG ");
    assert_eq!(outcome.fields, ChunkFields::WindShear(Some(WindShear::AllRunways)));
    assert_eq!(outcome.remaining, "NOSIG ");
}

#[test]
fn test_wind_shear_listed_runways() {
    let outcome = parse_ok(&WindShearDecoder, "WS R27L WS RWY09 TEMPO ");
    assert_eq!(
        outcome.fields,
        ChunkFields::WindShear(Some(WindShear::Runways(vec![
            "27L".to_string(),
            "09".to_string()
        ])))
    );
    assert_eq!(outcome.remaining, "TEMPO ");
}

#[test]
fn test_wind_shear_absent_and_invalid() {
    let outcome = parse_ok(&WindShearDecoder, "NOSIG ");
    assert_eq!(outcome.fields, ChunkFields::WindShear(None));

    let error = parse_err(&WindShearDecoder, "WS R45 ");
    assert_eq!(error.kind, ChunkErrorKind::InvalidWindShearRunway);
}
