//! Unit-tagged numeric values.
//!
//! Every measured quantity in a decoded report carries the unit it was
//! reported in. Conversion is only defined inside one family (speed,
//! distance, pressure); anything else is an [`Error::UnitConversion`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units appearing in METAR groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    DegreeCelsius,
    Degree,
    Knot,
    MeterPerSecond,
    KilometerPerHour,
    Meter,
    Feet,
    StatuteMile,
    HectoPascal,
    MercuryInch,
}

impl Unit {
    /// Short label used when printing values
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::DegreeCelsius => "deg C",
            Unit::Degree => "deg",
            Unit::Knot => "kt",
            Unit::MeterPerSecond => "m/s",
            Unit::KilometerPerHour => "km/h",
            Unit::Meter => "m",
            Unit::Feet => "ft",
            Unit::StatuteMile => "SM",
            Unit::HectoPascal => "hPa",
            Unit::MercuryInch => "inHg",
        }
    }

    /// Family and factor to the family's base unit
    fn base_rate(&self) -> Option<(UnitFamily, f64)> {
        match self {
            Unit::MeterPerSecond => Some((UnitFamily::Speed, 1.0)),
            Unit::KilometerPerHour => Some((UnitFamily::Speed, 0.277778)),
            Unit::Knot => Some((UnitFamily::Speed, 0.514444)),
            Unit::Meter => Some((UnitFamily::Distance, 1.0)),
            Unit::Feet => Some((UnitFamily::Distance, 0.3048)),
            Unit::StatuteMile => Some((UnitFamily::Distance, 1609.34)),
            Unit::HectoPascal => Some((UnitFamily::Pressure, 1.0)),
            Unit::MercuryInch => Some((UnitFamily::Pressure, 33.86389)),
            Unit::DegreeCelsius | Unit::Degree => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitFamily {
    Speed,
    Distance,
    Pressure,
}

/// A number and the unit it was reported in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub value: f64,
    pub unit: Unit,
}

impl Value {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Convert to another unit of the same family, rounded to 3 decimals
    pub fn converted(&self, to: Unit) -> Result<f64> {
        if to == self.unit {
            return Ok(self.value);
        }

        match (self.unit.base_rate(), to.base_rate()) {
            (Some((from_family, rate_from)), Some((to_family, rate_to)))
                if from_family == to_family =>
            {
                let converted = self.value * rate_from / rate_to;
                Ok((converted * 1000.0).round() / 1000.0)
            }
            _ => Err(Error::unit_conversion(self.unit, to)),
        }
    }

    /// Speed in whole knots
    pub fn to_knots(&self) -> Result<i64> {
        Ok(self.converted(Unit::Knot)?.trunc() as i64)
    }

    /// Speed in whole kilometers per hour
    pub fn to_kph(&self) -> Result<i64> {
        Ok(self.converted(Unit::KilometerPerHour)?.trunc() as i64)
    }

    /// Speed in whole meters per second
    pub fn to_mps(&self) -> Result<i64> {
        Ok(self.converted(Unit::MeterPerSecond)?.trunc() as i64)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Parse a signed METAR integer, `M` prefix meaning negative
///
/// Returns `None` for missing-data markers such as `//` or `///`.
pub fn parse_signed(raw: &str) -> Option<i32> {
    let (negative, digits) = match raw.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let value: i32 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
