//! Weather service for SkyScout
//!
//! Current conditions and city geocoding via the Open-Meteo API, plus the
//! device-location interface platform shells implement.

pub mod types;
pub mod client;
pub mod error;
pub mod location;

pub use types::*;
pub use client::{ResolvedCity, WeatherClient};
pub use error::{ClientError, LocationError};
pub use location::{FixedLocation, LocationFix, LocationProvider};
