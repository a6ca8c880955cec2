use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    COORDINATE_PRECISION, DEMO_CONDITION, DEMO_HUMIDITY_PCT, DEMO_TEMPERATURE_C,
    DEMO_WIND_SPEED_KMH,
};

// Record ids are millisecond timestamps taken at creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CrewId(pub i64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for CrewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CrewId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Device coordinates obtained from the location service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in meters, as reported by the device.
    pub accuracy: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// `"Lat: 1.3521° | Lng: 103.8198°"`
    pub fn display_coordinates(&self) -> String {
        format!(
            "Lat: {:.prec$}° | Lng: {:.prec$}°",
            self.latitude,
            self.longitude,
            prec = COORDINATE_PRECISION
        )
    }
}

/// Toast severity. Each level maps to a fixed background color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => "#2ECC71",
            Self::Error => "#E74C3C",
            Self::Warning => "#F39C12",
            Self::Info => "#00A8E8",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized weather conditions shown on the weather card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
}

impl WeatherReport {
    /// The fixed payload shown in demo mode.
    pub fn demo() -> Self {
        Self {
            temperature_c: DEMO_TEMPERATURE_C,
            condition: DEMO_CONDITION.to_string(),
            humidity_pct: DEMO_HUMIDITY_PCT,
            wind_speed_kmh: DEMO_WIND_SPEED_KMH,
        }
    }
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self::demo()
    }
}
