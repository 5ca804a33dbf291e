//! Chunk decoders, one per grammar production, in report order

pub mod clouds;
pub mod datetime;
pub mod icao;
pub mod present_weather;
pub mod pressure;
pub mod recent_weather;
pub mod report_status;
pub mod report_type;
pub mod runway_visual_range;
pub mod surface_wind;
pub mod temperature;
pub mod trend;
pub mod visibility;
pub mod wind_shear;

pub use clouds::CloudsDecoder;
pub use datetime::DateTimeDecoder;
pub use icao::IcaoDecoder;
pub use present_weather::PresentWeatherDecoder;
pub use pressure::PressureDecoder;
pub use recent_weather::RecentWeatherDecoder;
pub use report_status::ReportStatusDecoder;
pub use report_type::ReportTypeDecoder;
pub use runway_visual_range::RunwayVisualRangeDecoder;
pub use surface_wind::SurfaceWindDecoder;
pub use temperature::TemperatureDecoder;
pub use trend::TrendDecoder;
pub use visibility::VisibilityDecoder;
pub use wind_shear::WindShearDecoder;

use crate::constants::{MAX_RUNWAY_QFU, MIN_RUNWAY_QFU};
use crate::decoder::chunk::ChunkDecoder;

/// Runway designator whose two leading digits are a valid QFU
pub(crate) fn runway_qfu_is_valid(runway: &str) -> bool {
    runway
        .get(..2)
        .and_then(|digits| digits.parse::<u32>().ok())
        .is_some_and(|qfu| (MIN_RUNWAY_QFU..=MAX_RUNWAY_QFU).contains(&qfu))
}

/// All decoders in the order they appear in a report
pub fn standard_chain(visibility: VisibilityDecoder) -> Vec<Box<dyn ChunkDecoder>> {
    vec![
        Box::new(ReportTypeDecoder),
        Box::new(IcaoDecoder),
        Box::new(DateTimeDecoder),
        Box::new(ReportStatusDecoder),
        Box::new(SurfaceWindDecoder),
        Box::new(visibility),
        Box::new(RunwayVisualRangeDecoder),
        Box::new(PresentWeatherDecoder),
        Box::new(CloudsDecoder),
        Box::new(TemperatureDecoder),
        Box::new(PressureDecoder),
        Box::new(RecentWeatherDecoder),
        Box::new(WindShearDecoder),
        Box::new(TrendDecoder),
    ]
}
