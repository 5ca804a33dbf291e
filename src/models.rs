//! Decoded report entity and its value objects.
//!
//! A [`DecodedMetar`] is created once per decode call, seeded with the
//! normalized report text, and filled field by field as chunk decoders
//! succeed. Any field left as `None` was not decoded and is unknown; it is
//! never a stand-in for zero.

mod value;

pub use value::{Unit, Value, parse_signed};

use crate::error::DecodingException;
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report type announced at the start of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    Metar,
    MetarCor,
    Speci,
    SpeciCor,
}

impl ReportType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "METAR" => Some(ReportType::Metar),
            "METAR COR" => Some(ReportType::MetarCor),
            "SPECI" => Some(ReportType::Speci),
            "SPECI COR" => Some(ReportType::SpeciCor),
            _ => None,
        }
    }

    pub fn is_correction(&self) -> bool {
        matches!(self, ReportType::MetarCor | ReportType::SpeciCor)
    }

    /// Report kind without its correction marker
    pub fn base_name(&self) -> &'static str {
        match self {
            ReportType::Metar | ReportType::MetarCor => "METAR",
            ReportType::Speci | ReportType::SpeciCor => "SPECI",
        }
    }
}

/// Report status following the timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Auto,
    Nil,
    /// Any other three-letter status word (for example `COR`)
    Other(String),
}

impl ReportStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            crate::constants::AUTO_STATUS => ReportStatus::Auto,
            crate::constants::NIL_STATUS => ReportStatus::Nil,
            other => ReportStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Auto => crate::constants::AUTO_STATUS,
            ReportStatus::Nil => crate::constants::NIL_STATUS,
            ReportStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface wind group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceWind {
    /// Mean direction in degrees, `None` when variable or not reported
    pub mean_direction: Option<Value>,
    pub variable_direction: bool,
    /// Mean speed, `None` when the speed digits are missing (`//`)
    pub mean_speed: Option<Value>,
    /// Gust speed
    pub speed_variations: Option<Value>,
    /// `P` prefix: mean speed above the reported value
    pub is_above: bool,
    /// `P` prefix on the gust speed
    pub gust_is_above: bool,
    /// Extreme directions of a `dddVddd` group, minimum first
    pub direction_variations: Option<(Value, Value)>,
    pub speed_unit: Unit,
    pub raw_value: String,
}

/// Prevailing visibility group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Visibility {
    pub prevailing_visibility: Option<Value>,
    pub minimum_visibility: Option<Value>,
    pub minimum_visibility_direction: Option<String>,
    pub is_ndv: bool,
    pub is_cavok: bool,
    /// US `M` prefix, prevailing visibility below the reported value
    pub is_less_than: bool,
    /// Prevailing visibility reached the configured unlimited cutoff
    pub is_unlimited: bool,
    pub raw_value: Option<String>,
}

/// Past tendency of a runway visual range reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tendency {
    Upward,
    Downward,
    NoChange,
}

impl Tendency {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "U" => Some(Tendency::Upward),
            "D" => Some(Tendency::Downward),
            "N" => Some(Tendency::NoChange),
            _ => None,
        }
    }
}

/// Runway visual range for one runway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayVisualRange {
    pub runway: String,
    /// Single reading, set when the range is not variable
    pub visual_range: Option<Value>,
    /// Minimum and maximum reading of a variable range
    pub visual_range_interval: Option<(Value, Value)>,
    pub variable: bool,
    /// `P` marker on the single reading, or on the maximum of an interval
    pub is_greater_than: bool,
    /// `M` marker on the single reading, or on the maximum of an interval
    pub is_less_than: bool,
    /// `P` marker on the minimum of an interval
    pub minimum_is_greater_than: bool,
    /// `M` marker on the minimum of an interval
    pub minimum_is_less_than: bool,
    pub past_tendency: Option<Tendency>,
    pub raw_value: String,
}

/// One present or recent weather phenomenon
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeatherPhenomenon {
    /// `+`, `-` or `VC`
    pub intensity_proximity: Option<String>,
    /// Descriptor such as `TS`, `FZ` or `SH`
    pub characteristics: Option<String>,
    types: Vec<String>,
    pub raw_value: String,
}

impl WeatherPhenomenon {
    /// Most type codes one phenomenon can carry
    pub const MAX_TYPES: usize = 3;

    /// Phenomenon without type codes; add them with [`add_type`](Self::add_type)
    pub fn new(
        intensity_proximity: Option<String>,
        characteristics: Option<String>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            intensity_proximity,
            characteristics,
            types: Vec::new(),
            raw_value: raw_value.into(),
        }
    }

    /// Append a phenomenon type code; codes beyond the third are ignored
    pub fn add_type(&mut self, code: impl Into<String>) {
        if self.types.len() < Self::MAX_TYPES {
            self.types.push(code.into());
        }
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }
}

/// Cloud amount category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudAmount {
    Few,
    Scattered,
    Broken,
    Overcast,
    VerticalVisibility,
    NoSignificantClouds,
    NoCloudsDetected,
    Clear,
    SkyClear,
    /// `///` amount, not observable
    Unknown,
}

impl CloudAmount {
    pub fn from_code(code: &str) -> Self {
        match code {
            "FEW" => CloudAmount::Few,
            "SCT" => CloudAmount::Scattered,
            "BKN" => CloudAmount::Broken,
            "OVC" => CloudAmount::Overcast,
            "VV" => CloudAmount::VerticalVisibility,
            "NSC" => CloudAmount::NoSignificantClouds,
            "NCD" => CloudAmount::NoCloudsDetected,
            "CLR" => CloudAmount::Clear,
            "SKC" => CloudAmount::SkyClear,
            _ => CloudAmount::Unknown,
        }
    }

    /// Clear-sky sentinels carry no height
    pub fn is_clear_sky(&self) -> bool {
        matches!(
            self,
            CloudAmount::NoSignificantClouds
                | CloudAmount::NoCloudsDetected
                | CloudAmount::Clear
                | CloudAmount::SkyClear
        )
    }
}

/// Convective modifier of a cloud layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudType {
    Cumulonimbus,
    ToweringCumulus,
    CannotMeasure,
}

impl CloudType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CB" => Some(CloudType::Cumulonimbus),
            "TCU" => Some(CloudType::ToweringCumulus),
            "///" => Some(CloudType::CannotMeasure),
            _ => None,
        }
    }
}

/// One cloud layer or clear-sky sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub amount: CloudAmount,
    /// Base height in feet
    pub base_height: Option<Value>,
    pub cloud_type: Option<CloudType>,
    pub raw_value: String,
}

impl CloudLayer {
    fn base_feet(&self) -> Option<f64> {
        self.base_height.map(|height| height.value)
    }
}

/// Lowest layer with a positive base among the given amounts
pub fn lowest_layer<'a>(layers: &'a [CloudLayer], amounts: &[CloudAmount]) -> Option<&'a CloudLayer> {
    layers
        .iter()
        .filter(|layer| amounts.contains(&layer.amount))
        .filter(|layer| layer.base_feet().is_some_and(|feet| feet > 0.0))
        .min_by(|a, b| a.base_feet().unwrap_or(f64::MAX).total_cmp(&b.base_feet().unwrap_or(f64::MAX)))
}

/// Pressure group tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureTag {
    /// `Q`: QNH in hectopascals
    Qnh,
    /// `A`: altimeter setting in hundredths of inches of mercury
    Altimeter,
}

/// Pressure or altimeter setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    pub tag: PressureTag,
    /// Four digits as reported (`3000` for `A3000`)
    pub reported: u32,
    /// Scaled value (`30.00 inHg` for `A3000`)
    pub value: Value,
    pub raw_value: String,
}

impl Pressure {
    pub fn new(tag: PressureTag, reported: u32, raw_value: impl Into<String>) -> Self {
        let value = match tag {
            PressureTag::Qnh => Value::new(f64::from(reported), Unit::HectoPascal),
            PressureTag::Altimeter => Value::new(f64::from(reported) / 100.0, Unit::MercuryInch),
        };

        Self {
            tag,
            reported,
            value,
            raw_value: raw_value.into(),
        }
    }
}

/// Wind shear markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindShear {
    AllRunways,
    Runways(Vec<String>),
}

/// Trend change indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendKind {
    NoSignificantChanges,
    Becoming,
    Temporary,
}

impl TrendKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NOSIG" => Some(TrendKind::NoSignificantChanges),
            "BECMG" => Some(TrendKind::Becoming),
            "TEMPO" => Some(TrendKind::Temporary),
            _ => None,
        }
    }
}

/// Trend forecast appended to the report
///
/// Sub-groups are kept as raw text; they follow the main report grammar and
/// can be decoded again by the caller if needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendForecast {
    pub kind: TrendKind,
    pub at_time: Option<String>,
    pub from_time: Option<String>,
    pub until_time: Option<String>,
    pub surface_wind: Option<String>,
    pub prevailing_visibility: Option<String>,
    pub weather_codes: Option<String>,
    pub clouds: Option<String>,
    pub raw_value: String,
}

/// How the decoder chain stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecodeTermination {
    /// Every decoder in the chain ran
    #[default]
    ChainExhausted,
    /// A NIL status stopped the chain; the report is valid but partial
    NilExit,
    /// Strict mode stopped the chain at the first failing chunk
    StrictAbort,
}

/// Structured result of decoding one report line
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DecodedMetar {
    /// Normalized report text, without the trailing delimiter
    pub raw_metar: String,
    pub report_type: Option<ReportType>,
    pub icao: Option<String>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub status: Option<ReportStatus>,
    pub surface_wind: Option<SurfaceWind>,
    pub visibility: Option<Visibility>,
    pub cavok: bool,
    pub runways_visual_range: Vec<RunwayVisualRange>,
    pub present_weather: Vec<WeatherPhenomenon>,
    pub clouds: Vec<CloudLayer>,
    pub ceiling: Option<CloudLayer>,
    pub air_temperature: Option<i32>,
    pub dew_point_temperature: Option<i32>,
    pub pressure: Option<Pressure>,
    pub recent_weather: Option<WeatherPhenomenon>,
    pub wind_shear: Option<WindShear>,
    pub trend: Option<TrendForecast>,
    pub termination: DecodeTermination,
    decoding_exceptions: Vec<DecodingException>,
}

impl DecodedMetar {
    pub(crate) fn new(normalized: &str) -> Self {
        Self {
            raw_metar: normalized.trim().to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn add_decoding_exception(&mut self, exception: DecodingException) {
        self.decoding_exceptions.push(exception);
    }

    /// Chunk failures in the order they were met
    pub fn decoding_exceptions(&self) -> &[DecodingException] {
        &self.decoding_exceptions
    }

    /// No chunk failed, recovered or not
    pub fn is_valid(&self) -> bool {
        self.decoding_exceptions.is_empty()
    }

    pub fn is_nil(&self) -> bool {
        self.status == Some(ReportStatus::Nil)
    }

    /// Observation time as `HH:MM UTC`
    pub fn time_label(&self) -> Option<String> {
        Some(format!("{:02}:{:02} UTC", self.hour?, self.minute?))
    }

    /// Lowest ceiling among caller-chosen amounts
    ///
    /// An empty slice falls back to broken and overcast layers.
    pub fn ceiling_with(&self, amounts: &[CloudAmount]) -> Option<&CloudLayer> {
        const DEFAULT_CEILING_AMOUNTS: [CloudAmount; 2] = [CloudAmount::Broken, CloudAmount::Overcast];

        if amounts.is_empty() {
            lowest_layer(&self.clouds, &DEFAULT_CEILING_AMOUNTS)
        } else {
            lowest_layer(&self.clouds, amounts)
        }
    }

    /// Resolve day/hour/minute to a full timestamp
    ///
    /// The report day is placed in the month of `reference`, or in the
    /// previous month when that would land after `reference`.
    pub fn observation_time(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (day, hour, minute) = (self.day?, self.hour?, self.minute?);

        let this_month = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?;
        let candidates = [Some(this_month), this_month.checked_sub_months(Months::new(1))];

        candidates
            .into_iter()
            .flatten()
            .filter_map(|month| month.with_day(day))
            .filter_map(|date| date.and_hms_opt(hour, minute, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .find(|timestamp| *timestamp <= reference)
    }
}
