//! Shared state vocabulary for the favourites list and the home slot.

use skyscout_weather::{Coordinates, Observation};
use uuid::Uuid;

/// Lifecycle of one weather slot.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    /// A fetch is outstanding. Also the initial placeholder state.
    Loading,
    Loaded(Observation),
    /// Terminal for entries without coordinates; recoverable via refresh
    /// otherwise.
    Failed { message: String },
}

impl WeatherState {
    /// Card summary line: "Loading..." / the condition / "Unknown".
    pub fn summary_text(&self) -> &str {
        match self {
            WeatherState::Loading => "Loading...",
            WeatherState::Loaded(obs) => obs.condition.summary(),
            WeatherState::Failed { .. } => "Unknown",
        }
    }

    /// Card temperature: "--" until a numeric reading is available.
    pub fn temp_text(&self) -> String {
        match self {
            WeatherState::Loaded(Observation { temp: Some(t), .. }) => format!("{}°C", t),
            _ => "--".to_string(),
        }
    }

    /// "HH:MM" stamp of the loaded reading.
    pub fn updated_text(&self) -> Option<&str> {
        match self {
            WeatherState::Loaded(obs) => Some(obs.updated_at.as_str()),
            _ => None,
        }
    }

    /// Card glyph, once a reading is loaded.
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            WeatherState::Loaded(obs) => Some(obs.condition.glyph()),
            _ => None,
        }
    }

    /// Per-slot error line, when failed.
    pub fn error_text(&self) -> Option<&str> {
        match self {
            WeatherState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WeatherState::Loading)
    }
}

/// One saved city with its own fetch lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FavouriteCity {
    /// Stable for the row's lifetime; never reused.
    pub id: Uuid,
    pub label: String,
    /// `None` means the city lookup failed; such an entry never refreshes.
    pub coordinates: Option<Coordinates>,
    pub weather: WeatherState,
}
