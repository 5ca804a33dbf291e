//! Tests for the surface wind chunk

use super::*;
use crate::decoder::chunks::SurfaceWindDecoder;
use crate::decoder::fields::ChunkFields;
use crate::models::{SurfaceWind, Unit, Value};

fn wind(text: &str) -> (SurfaceWind, String) {
    let outcome = parse_ok(&SurfaceWindDecoder, text);
    match outcome.fields {
        ChunkFields::SurfaceWind(wind) => (wind, outcome.remaining),
        other => panic!("unexpected fields {other:?}"),
    }
}

#[test]
fn test_plain_wind() {
    let (wind, remaining) = wind("18010KT 10SM ");

    assert_eq!(wind.mean_direction, Some(Value::new(180.0, Unit::Degree)));
    assert_eq!(wind.mean_speed, Some(Value::new(10.0, Unit::Knot)));
    assert_eq!(wind.speed_unit, Unit::Knot);
    assert!(!wind.variable_direction);
    assert_eq!(wind.speed_variations, None);
    assert_eq!(wind.direction_variations, None);
    assert!(!wind.is_above);
    assert_eq!(wind.raw_value, "18010KT");
    assert_eq!(remaining, "10SM ");
}

#[test]
fn test_variable_wind() {
    let (wind, _) = wind("VRB03KT 9999 ");
    assert!(wind.variable_direction);
    assert_eq!(wind.mean_direction, None);
    assert_eq!(wind.mean_speed, Some(Value::new(3.0, Unit::Knot)));
}

#[test]
fn test_gust_and_direction_variations() {
    let (wind, remaining) = wind("27015G25MPS 240V300 9999 ");

    assert_eq!(wind.speed_unit, Unit::MeterPerSecond);
    assert_eq!(wind.speed_variations, Some(Value::new(25.0, Unit::MeterPerSecond)));
    assert_eq!(
        wind.direction_variations,
        Some((
            Value::new(240.0, Unit::Degree),
            Value::new(300.0, Unit::Degree)
        ))
    );
    assert_eq!(remaining, "9999 ");
}

#[test]
fn test_speed_above_reported_value() {
    let (strong, remaining) = wind("180P99KT 9999 ");
    assert!(strong.is_above);
    assert!(!strong.gust_is_above);
    assert_eq!(strong.mean_speed, Some(Value::new(99.0, Unit::Knot)));
    assert_eq!(remaining, "9999 ");

    let (gusty, _) = wind("27050GP99KT 9999 ");
    assert!(!gusty.is_above);
    assert!(gusty.gust_is_above);
    assert_eq!(gusty.speed_variations, Some(Value::new(99.0, Unit::Knot)));
}

#[test]
fn test_missing_speed_digits() {
    let (wind, _) = wind("180//KT 9999 ");
    assert_eq!(wind.mean_direction, Some(Value::new(180.0, Unit::Degree)));
    assert_eq!(wind.mean_speed, None);
}

#[test]
fn test_nothing_measured() {
    let error = parse_err(&SurfaceWindDecoder, "/////KT 9999 ");
    assert_chunk_error(&error, ChunkErrorKind::NoSurfaceWindMeasured, "/////KT 9999 ");
}

#[test]
fn test_direction_out_of_range() {
    let error = parse_err(&SurfaceWindDecoder, "37010KT 9999 ");
    assert_eq!(error.kind, ChunkErrorKind::InvalidWindDirection);

    let error = parse_err(&SurfaceWindDecoder, "18010KT 370V010 9999 ");
    assert_eq!(error.kind, ChunkErrorKind::InvalidWindDirectionVariations);
}

#[test]
fn test_bad_format_keeps_both_texts() {
    let error = parse_err(&SurfaceWindDecoder, "180X10KT 10SM ");
    assert_chunk_error(&error, ChunkErrorKind::SurfaceWindBadFormat, "180X10KT 10SM ");
    assert_eq!(error.next_remaining.as_deref(), Some("10SM "));
}
