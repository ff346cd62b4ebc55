//! Open-Meteo API client: current conditions and city-name geocoding.

use std::time::Duration;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::error::ClientError;
use crate::types::{local_hhmm, Observation, WeatherCondition};

/// A geocoding match. `label` is the provider's canonical spelling of the
/// city and may differ from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCity {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    forecast_url: String,
    geocoding_url: String,
}

impl WeatherClient {
    pub fn new(
        forecast_url: &str,
        geocoding_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            forecast_url: forecast_url.to_string(),
            geocoding_url: geocoding_url.to_string(),
        })
    }

    /// Fetch current conditions for a point.
    ///
    /// `updated_at` is stamped with the local wall clock when the result is
    /// produced, not a server timestamp. A missing or non-numeric
    /// temperature becomes `None`; a missing weather code reads as cloudy.
    #[instrument(skip(self, cancel), level = "info")]
    pub async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        cancel: &CancellationToken,
    ) -> Result<Observation, ClientError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,weather_code&temperature_unit=celsius",
            self.forecast_url, latitude, longitude
        );

        let body: ForecastResponse = self.get_json(&url, cancel).await?;
        let current = body.current.unwrap_or_default();

        let temp = current
            .temperature_2m
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .map(|t| t.round() as i32);

        let condition = current
            .weather_code
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .map_or(WeatherCondition::Cloudy, |code| {
                WeatherCondition::from_wmo_code(code as i32)
            });

        Ok(Observation {
            temp,
            condition,
            updated_at: local_hhmm(),
        })
    }

    /// Resolve a city name to coordinates. Returns the best match only.
    #[instrument(skip(self, cancel), level = "info")]
    pub async fn resolve_city(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolvedCity, ClientError> {
        let url = format!(
            "{}?name={}&count=1&language=en&format=json",
            self.geocoding_url,
            urlencoding::encode(name.trim()),
        );

        let body: GeocodingResponse = self.get_json(&url, cancel).await?;

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or(ClientError::CityNotFound)?;

        Ok(ResolvedCity {
            latitude: first.latitude,
            longitude: first.longitude,
            label: first.name,
        })
    }

    /// Issue a GET, racing it against cancellation.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ClientError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.fetch_json(url) => result,
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ClientError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentBlock>,
}

/// The `current` block, kept loose: the provider has been seen omitting
/// fields, and a bad reading must not fail the whole response.
#[derive(Debug, Default, Deserialize)]
struct CurrentBlock {
    #[serde(default)]
    temperature_2m: Option<serde_json::Value>,
    #[serde(default)]
    weather_code: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingMatch>,
}

#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    latitude: f64,
    longitude: f64,
    name: String,
}
