use chrono::Local;
use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Rounded 3-decimal key. Two readings with the same key are treated
    /// as the same place; roughly a city block of precision.
    pub fn key(&self) -> String {
        format!("{:.3},{:.3}", self.latitude, self.longitude)
    }

    /// Label used when no place name is available
    pub fn fallback_label(&self) -> String {
        format!("Lat {:.3}, Lon {:.3}", self.latitude, self.longitude)
    }
}

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Cloudy,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => Self::Rain,
            71 | 73 | 75 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Cloudy, // Unknown codes default to cloudy
        }
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Cloudy => "Cloudy",
        }
    }

    /// Get the card glyph for this condition
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy | Self::Cloudy => "⛅️",
            Self::Fog => "🌫️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Thunderstorm => "⛈️",
        }
    }
}

/// One completed current-weather reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Whole-degree Celsius; absent when the API omitted the reading
    pub temp: Option<i32>,
    pub condition: WeatherCondition,
    /// Local wall-clock "HH:MM" at the moment the result was produced
    pub updated_at: String,
}

/// Local wall-clock time as "HH:MM", the stamp shown on weather cards
pub fn local_hhmm() -> String {
    Local::now().format("%H:%M").to_string()
}
