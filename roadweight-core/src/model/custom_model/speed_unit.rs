use serde::{Deserialize, Serialize};
use uom::si::{
    f64::Velocity,
    velocity::{kilometer_per_hour, meter_per_second, mile_per_hour},
};

/// unit of the values stored in the base speed attribute
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    #[default]
    #[serde(alias = "kilometers_per_hour")]
    Kph,
    #[serde(alias = "miles_per_hour")]
    Mph,
    #[serde(alias = "meters_per_second")]
    Mps,
}

impl SpeedUnit {
    pub fn to_uom(&self, value: f64) -> Velocity {
        match self {
            SpeedUnit::Kph => Velocity::new::<kilometer_per_hour>(value),
            SpeedUnit::Mph => Velocity::new::<mile_per_hour>(value),
            SpeedUnit::Mps => Velocity::new::<meter_per_second>(value),
        }
    }

    /// meters per second of one unit of this speed
    pub fn meters_per_second(&self) -> f64 {
        self.to_uom(1.0).get::<meter_per_second>()
    }
}

impl std::fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SpeedUnit::Kph => "kph",
            SpeedUnit::Mph => "mph",
            SpeedUnit::Mps => "mps",
        };
        write!(f, "{s}")
    }
}
