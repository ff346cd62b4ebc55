//! Weather and location error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed ({status})")]
    RequestFailed { status: u16 },

    #[error("City not found")]
    CityNotFound,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailed { status } if *status >= 500 => {
                "The weather service is having trouble. Try again later.".to_string()
            }
            Self::RequestFailed { status } => {
                format!("The weather request failed ({}). Try again.", status)
            }
            Self::CityNotFound => "City not found".to_string(),
            Self::Cancelled => "The request was interrupted".to_string(),
            Self::InvalidResponse(_) => "Unexpected response from the weather service".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether the caller must absorb this silently: no state change, no
    /// user-visible error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable")]
    Unavailable,
}

impl LocationError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Location permission denied. Enable it in system settings.".to_string()
            }
            Self::Unavailable => "Couldn't determine your location. Try again later.".to_string(),
        }
    }
}
