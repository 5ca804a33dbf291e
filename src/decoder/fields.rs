//! Typed partial results produced by chunk decoders

use crate::models::{
    CloudLayer, DecodedMetar, Pressure, ReportStatus, ReportType, RunwayVisualRange,
    SurfaceWind, TrendForecast, Visibility, WeatherPhenomenon, WindShear,
};

/// Fields one chunk decoder is allowed to set on the report
///
/// Each variant lists exactly the report fields of its production, so the
/// merge below is checked by the compiler instead of matched by name.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkFields {
    ReportType(Option<ReportType>),
    Icao(String),
    DateTime {
        day: u32,
        hour: u32,
        minute: u32,
    },
    ReportStatus(Option<ReportStatus>),
    SurfaceWind(SurfaceWind),
    Visibility {
        visibility: Visibility,
        cavok: bool,
    },
    RunwayVisualRange(Vec<RunwayVisualRange>),
    PresentWeather(Vec<WeatherPhenomenon>),
    Clouds {
        layers: Vec<CloudLayer>,
        ceiling: Option<CloudLayer>,
    },
    Temperature {
        air: Option<i32>,
        dew_point: Option<i32>,
    },
    Pressure(Option<Pressure>),
    RecentWeather(Option<WeatherPhenomenon>),
    WindShear(Option<WindShear>),
    Trend(Option<TrendForecast>),
}

impl ChunkFields {
    /// Merge into the report being built
    pub fn apply(self, report: &mut DecodedMetar) {
        match self {
            ChunkFields::ReportType(report_type) => report.report_type = report_type,
            ChunkFields::Icao(icao) => report.icao = Some(icao),
            ChunkFields::DateTime { day, hour, minute } => {
                report.day = Some(day);
                report.hour = Some(hour);
                report.minute = Some(minute);
            }
            ChunkFields::ReportStatus(status) => report.status = status,
            ChunkFields::SurfaceWind(wind) => report.surface_wind = Some(wind),
            ChunkFields::Visibility { visibility, cavok } => {
                report.visibility = Some(visibility);
                report.cavok = cavok;
            }
            ChunkFields::RunwayVisualRange(ranges) => report.runways_visual_range = ranges,
            ChunkFields::PresentWeather(weather) => report.present_weather = weather,
            ChunkFields::Clouds { layers, ceiling } => {
                report.clouds = layers;
                report.ceiling = ceiling;
            }
            ChunkFields::Temperature { air, dew_point } => {
                report.air_temperature = air;
                report.dew_point_temperature = dew_point;
            }
            ChunkFields::Pressure(pressure) => report.pressure = pressure,
            ChunkFields::RecentWeather(weather) => report.recent_weather = weather,
            ChunkFields::WindShear(shear) => report.wind_shear = shear,
            ChunkFields::Trend(trend) => report.trend = trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_only_own_fields() {
        let mut report = DecodedMetar::default();
        report.icao = Some("LFPG".to_string());

        ChunkFields::DateTime {
            day: 1,
            hour: 2,
            minute: 3,
        }
        .apply(&mut report);

        assert_eq!(report.icao.as_deref(), Some("LFPG"));
        assert_eq!((report.day, report.hour, report.minute), (Some(1), Some(2), Some(3)));
        assert!(report.surface_wind.is_none());
    }

    #[test]
    fn test_apply_visibility_sets_cavok() {
        let mut report = DecodedMetar::default();
        ChunkFields::Visibility {
            visibility: Visibility {
                is_cavok: true,
                ..Visibility::default()
            },
            cavok: true,
        }
        .apply(&mut report);

        assert!(report.cavok);
        assert!(report.visibility.unwrap().is_cavok);
    }
}
