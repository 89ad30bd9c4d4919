//! Wind observations as they arrive from the weather station.
use serde::Deserialize;

/// Units a weather station might report wind speed in.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    #[default]
    Knots,
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    const KNOTS_PER_METER_PER_SECOND: f32 = 1.943_844;
    const KNOTS_PER_KILOMETER_PER_HOUR: f32 = 0.539_957;
    const KNOTS_PER_MILE_PER_HOUR: f32 = 0.868_976;

    /// Unit used for wind speed by each weewx unit system (the `usUnits` field of a packet).
    ///
    /// 1 is US (mph), 16 is METRIC (km/h) and 17 is METRICWX (m/s).
    pub fn from_unit_system(us_units: u8) -> Option<Self> {
        match us_units {
            0x01 => Some(Self::MilesPerHour),
            0x10 => Some(Self::KilometersPerHour),
            0x11 => Some(Self::MetersPerSecond),
            _ => None,
        }
    }

    pub fn to_knots(self, value: f32) -> f32 {
        match self {
            Self::Knots => value,
            Self::MetersPerSecond => value * Self::KNOTS_PER_METER_PER_SECOND,
            Self::KilometersPerHour => value * Self::KNOTS_PER_KILOMETER_PER_HOUR,
            Self::MilesPerHour => value * Self::KNOTS_PER_MILE_PER_HOUR,
        }
    }
}

/// One wind sample. `None` means the station did not have a value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation {
    /// knots
    pub speed: Option<f32>,
    /// degrees the wind is coming from
    pub direction: Option<f32>,
}

impl Observation {
    /// NaN and infinity are treated the same as a missing value
    pub fn new(speed_knots: Option<f32>, direction: Option<f32>) -> Self {
        Self {
            speed: speed_knots.filter(|x| x.is_finite()),
            direction: direction.filter(|x| x.is_finite()),
        }
    }

    pub fn from_unit(speed: Option<f32>, direction: Option<f32>, unit: SpeedUnit) -> Self {
        Self::new(speed.map(|x| unit.to_knots(x)), direction)
    }
}
