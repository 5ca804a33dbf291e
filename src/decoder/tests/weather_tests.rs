//! Tests for present and recent weather chunks

use super::*;
use crate::decoder::chunks::{PresentWeatherDecoder, RecentWeatherDecoder};
use crate::decoder::fields::ChunkFields;
use crate::models::WeatherPhenomenon;

fn present(text: &str) -> (Vec<WeatherPhenomenon>, String) {
    let outcome = parse_ok(&PresentWeatherDecoder, text);
    match outcome.fields {
        ChunkFields::PresentWeather(weather) => (weather, outcome.remaining),
        other => panic!("unexpected fields {other:?}"),
    }
}

#[test]
fn test_two_phenomena() {
    let (weather, remaining) = present("-SHRA BR FEW010 ");

    assert_eq!(weather.len(), 2);
    assert_eq!(weather[0].intensity_proximity.as_deref(), Some("-"));
    assert_eq!(weather[0].characteristics.as_deref(), Some("SH"));
    assert_eq!(weather[0].types(), ["RA"]);
    assert_eq!(weather[0].raw_value, "-SHRA");
    assert_eq!(weather[1].intensity_proximity, None);
    assert_eq!(weather[1].types(), ["BR"]);
    assert_eq!(remaining, "FEW010 ");
}

#[test]
fn test_several_types_in_one_phenomenon() {
    let (weather, _) = present("+TSRAGR BKN010CB ");
    assert_eq!(weather.len(), 1);
    assert_eq!(weather[0].characteristics.as_deref(), Some("TS"));
    assert_eq!(weather[0].types(), ["RA", "GR"]);
}

#[test]
fn test_proximity() {
    let (weather, _) = present("VCFG 15/10 ");
    assert_eq!(weather[0].intensity_proximity.as_deref(), Some("VC"));
    assert_eq!(weather[0].types(), ["FG"]);
}

#[test]
fn test_missing_sentinel_is_skipped() {
    let (weather, remaining) = present("// FEW010 ");
    assert!(weather.is_empty());
    assert_eq!(remaining, "FEW010 ");
}

#[test]
fn test_absent_weather_matches_nothing() {
    let (weather, remaining) = present("FEW250 24/18 ");
    assert!(weather.is_empty());
    assert_eq!(remaining, "FEW250 24/18 ");
}

#[test]
fn test_at_most_three_phenomena() {
    let (weather, remaining) = present("RA BR HZ FU FEW010 ");
    assert_eq!(weather.len(), 3);
    assert_eq!(remaining, "FU FEW010 ");
}

#[test]
fn test_recent_weather() {
    let outcome = parse_ok(&RecentWeatherDecoder, "RETSRA WS R27 ");
    let ChunkFields::RecentWeather(Some(weather)) = outcome.fields else {
        panic!("recent weather expected");
    };

    assert_eq!(weather.intensity_proximity, None);
    assert_eq!(weather.characteristics.as_deref(), Some("TS"));
    assert_eq!(weather.types(), ["RA"]);
    assert_eq!(outcome.remaining, "WS R27 ");
}

#[test]
fn test_recent_weather_absent() {
    let outcome = parse_ok(&RecentWeatherDecoder, "WS R27 ");
    assert_eq!(outcome.fields, ChunkFields::RecentWeather(None));
    assert_eq!(outcome.remaining, "WS R27 ");
}
