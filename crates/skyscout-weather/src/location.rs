//! Device location: a one-shot position lookup behind a trait, so platform
//! shells can plug in geolocation APIs and tests can script outcomes.

use async_trait::async_trait;

use crate::error::LocationError;
use crate::types::Coordinates;

/// A resolved device position.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    /// Reverse-geocoded place name, when the platform offers one.
    pub label: Option<String>,
}

impl LocationFix {
    /// The place name, or formatted coordinates when no name is known.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => self.coordinates.fallback_label(),
        }
    }
}

/// Source of the device's position. Resolved once at startup; repeated
/// readings are the controller's concern, not the provider's.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn resolve(&self) -> Result<LocationFix, LocationError>;
}

/// A pinned position: headless shells, demos and tests.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    fix: LocationFix,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            fix: LocationFix {
                coordinates: Coordinates {
                    latitude,
                    longitude,
                },
                label: None,
            },
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.fix.label = Some(label.into());
        self
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn resolve(&self) -> Result<LocationFix, LocationError> {
        Ok(self.fix.clone())
    }
}
