//! The home slot: weather for wherever the device currently is.
//!
//! A small state machine keyed on rounded coordinates. Only a key change
//! triggers a fetch, a key change cancels the previous fetch, and a
//! completion only lands while its originating key is still current.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use skyscout_weather::{
    ClientError, Coordinates, LocationError, LocationFix, Observation, WeatherClient,
};

use crate::service::{self, HomeMessage};
use crate::state::WeatherState;

/// Status label until the provider reports anything.
const LOCATING: &str = "Finding city...";

pub struct HomeWeatherController {
    client: Arc<WeatherClient>,
    handle: Handle,
    tx: Sender<HomeMessage>,
    coords_key: Option<String>,
    city_label: String,
    weather: WeatherState,
    banner: Option<String>,
    cancel: CancellationToken,
}

impl HomeWeatherController {
    pub fn new(client: Arc<WeatherClient>, handle: Handle, tx: Sender<HomeMessage>) -> Self {
        Self {
            client,
            handle,
            tx,
            coords_key: None,
            city_label: LOCATING.to_string(),
            weather: WeatherState::Loading,
            banner: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn city_label(&self) -> &str {
        &self.city_label
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    /// Transient error strip above the card, cleared by the next fetch.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn coords_key(&self) -> Option<&str> {
        self.coords_key.as_deref()
    }

    /// Apply one completion from the service layer.
    pub fn apply(&mut self, message: HomeMessage) {
        match message {
            HomeMessage::LocationDone(Ok(fix)) => self.location_resolved(fix),
            HomeMessage::LocationDone(Err(e)) => self.location_failed(&e),
            HomeMessage::FetchDone { key, result } => self.fetch_done(&key, result),
        }
    }

    /// React to a device position reading, possibly a repeated one. A
    /// reading whose rounded key matches the current key is ignored
    /// outright: no re-fetch, no state reset.
    pub fn update_coordinates(&mut self, coordinates: Coordinates) {
        let key = coordinates.key();
        if self.coords_key.as_deref() == Some(key.as_str()) {
            tracing::debug!(%key, "coordinates unchanged, skipping fetch");
            return;
        }

        self.cancel.cancel();
        self.cancel = CancellationToken::new();

        self.coords_key = Some(key.clone());
        self.weather = WeatherState::Loading;
        self.banner = None;

        service::request_home_weather(
            &self.tx,
            &self.handle,
            self.client.clone(),
            key,
            coordinates,
            self.cancel.clone(),
        );
    }

    fn location_resolved(&mut self, fix: LocationFix) {
        self.city_label = fix.display_label();
        self.update_coordinates(fix.coordinates);
    }

    /// Location failure touches the label and banner only; any weather
    /// already on screen stays.
    fn location_failed(&mut self, error: &LocationError) {
        tracing::warn!(error = %error, "device location unavailable");
        self.city_label = match error {
            LocationError::PermissionDenied => "Location permission denied",
            LocationError::Unavailable => "Unknown location",
        }
        .to_string();
        self.banner = Some(error.user_message());
    }

    fn fetch_done(&mut self, key: &str, result: Result<Observation, ClientError>) {
        if self.coords_key.as_deref() != Some(key) {
            tracing::debug!(%key, "home fetch for a stale key, discarding");
            return;
        }

        match result {
            Ok(observation) => self.weather = WeatherState::Loaded(observation),
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                tracing::warn!(error = %e, "home weather fetch failed");
                self.banner = Some(e.user_message());
                self.weather = WeatherState::Failed { message: e.user_message() };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use skyscout_weather::WeatherCondition;
    use std::sync::mpsc;
    use std::time::Duration;

    fn test_controller() -> (HomeWeatherController, mpsc::Receiver<HomeMessage>) {
        let (tx, rx) = mpsc::channel();
        let client = Arc::new(
            WeatherClient::new(
                "http://127.0.0.1:9",
                "http://127.0.0.1:9",
                Duration::from_millis(100),
            )
            .unwrap(),
        );
        (HomeWeatherController::new(client, Handle::current(), tx), rx)
    }

    fn observation(temp: i32) -> Observation {
        Observation {
            temp: Some(temp),
            condition: WeatherCondition::Clear,
            updated_at: "09:30".to_string(),
        }
    }

    fn fix(latitude: f64, longitude: f64, label: Option<&str>) -> LocationFix {
        LocationFix {
            coordinates: Coordinates { latitude, longitude },
            label: label.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_locating() {
        let (home, _rx) = test_controller();
        assert_eq!(home.city_label(), "Finding city...");
        assert!(home.weather().is_loading());
        assert_eq!(home.banner(), None);
        assert_eq!(home.coords_key(), None);
    }

    #[tokio::test]
    async fn test_location_resolved_sets_label_and_key() {
        let (mut home, _rx) = test_controller();

        home.apply(HomeMessage::LocationDone(Ok(fix(59.9111, 10.7528, Some("Oslo")))));

        assert_eq!(home.city_label(), "Oslo");
        assert_eq!(home.coords_key(), Some("59.911,10.753"));
        assert!(home.weather().is_loading());
    }

    #[tokio::test]
    async fn test_location_without_label_uses_coordinates() {
        let (mut home, _rx) = test_controller();

        home.apply(HomeMessage::LocationDone(Ok(fix(59.9111, 10.7528, None))));

        assert_eq!(home.city_label(), "Lat 59.911, Lon 10.753");
    }

    #[tokio::test]
    async fn test_repeated_key_does_not_reset_state() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });
        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Ok(observation(7)),
        });
        assert_eq!(home.weather().temp_text(), "7°C");

        // Same rounded key: the loaded card must stay put.
        home.update_coordinates(Coordinates { latitude: 59.9114, longitude: 10.7531 });
        assert_eq!(home.weather().temp_text(), "7°C");
        assert_eq!(home.coords_key(), Some("59.911,10.753"));
    }

    #[tokio::test]
    async fn test_key_change_resets_and_refetches() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });
        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Ok(observation(7)),
        });

        home.update_coordinates(Coordinates { latitude: 60.3913, longitude: 5.3221 });

        assert_eq!(home.coords_key(), Some("60.391,5.322"));
        assert!(home.weather().is_loading());
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });
        home.update_coordinates(Coordinates { latitude: 60.3913, longitude: 5.3221 });

        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Ok(observation(7)),
        });

        assert!(home.weather().is_loading());
    }

    #[tokio::test]
    async fn test_cancelled_completion_changes_nothing() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });

        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Err(ClientError::Cancelled),
        });

        assert!(home.weather().is_loading());
        assert_eq!(home.banner(), None);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_banner_and_failed_card() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });

        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Err(ClientError::RequestFailed { status: 502 }),
        });

        assert!(home.banner().unwrap().contains("having trouble"));
        assert_eq!(home.weather().summary_text(), "Unknown");
    }

    #[tokio::test]
    async fn test_location_denied_keeps_weather_untouched() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });
        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Ok(observation(7)),
        });

        home.apply(HomeMessage::LocationDone(Err(LocationError::PermissionDenied)));

        assert_eq!(home.city_label(), "Location permission denied");
        assert!(home.banner().unwrap().contains("permission"));
        assert_eq!(home.weather().temp_text(), "7°C");
    }

    #[tokio::test]
    async fn test_location_unavailable_label() {
        let (mut home, _rx) = test_controller();

        home.apply(HomeMessage::LocationDone(Err(LocationError::Unavailable)));

        assert_eq!(home.city_label(), "Unknown location");
        assert!(home.banner().is_some());
    }

    #[tokio::test]
    async fn test_new_fetch_clears_banner() {
        let (mut home, _rx) = test_controller();
        home.update_coordinates(Coordinates { latitude: 59.9111, longitude: 10.7528 });
        home.apply(HomeMessage::FetchDone {
            key: "59.911,10.753".to_string(),
            result: Err(ClientError::RequestFailed { status: 502 }),
        });
        assert!(home.banner().is_some());

        home.update_coordinates(Coordinates { latitude: 60.3913, longitude: 5.3221 });
        assert_eq!(home.banner(), None);
    }
}
