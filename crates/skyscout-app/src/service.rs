//! Weather backend: async lookups and fetches for the stores.
//! All network work runs off the owning thread; results come back via mpsc.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use skyscout_weather::{
    ClientError, Coordinates, LocationError, LocationFix, LocationProvider, Observation,
    ResolvedCity, WeatherClient,
};

/// Messages sent from async favourites operations back to the owning thread
#[derive(Debug)]
pub enum FavouritesMessage {
    /// Result of a city-name lookup for the entry with this id
    ResolveDone { id: Uuid, result: Result<ResolvedCity, ClientError> },
    /// Result of a weather fetch for the entry with this id
    FetchDone { id: Uuid, result: Result<Observation, ClientError> },
}

/// Messages sent from async home-slot operations back to the owning thread
#[derive(Debug)]
pub enum HomeMessage {
    /// Result of the one-shot device-location resolution
    LocationDone(Result<LocationFix, LocationError>),
    /// Result of a weather fetch issued while `key` was current
    FetchDone { key: String, result: Result<Observation, ClientError> },
}

/// Request a city-name lookup for a just-added favourite.
pub fn request_city_resolve(
    tx: &std::sync::mpsc::Sender<FavouritesMessage>,
    handle: &Handle,
    client: Arc<WeatherClient>,
    id: Uuid,
    name: String,
) {
    let tx = tx.clone();
    handle.spawn(async move {
        let cancel = CancellationToken::new();
        let result = client.resolve_city(&name, &cancel).await;
        let _ = tx.send(FavouritesMessage::ResolveDone { id, result });
    });
}

/// Request a weather fetch for a favourite entry.
pub fn request_favourite_weather(
    tx: &std::sync::mpsc::Sender<FavouritesMessage>,
    handle: &Handle,
    client: Arc<WeatherClient>,
    id: Uuid,
    coordinates: Coordinates,
) {
    let tx = tx.clone();
    handle.spawn(async move {
        let cancel = CancellationToken::new();
        let result = client
            .fetch_current_weather(coordinates.latitude, coordinates.longitude, &cancel)
            .await;
        let _ = tx.send(FavouritesMessage::FetchDone { id, result });
    });
}

/// Request a weather fetch for the home slot. `cancel` belongs to the
/// controller, which cancels it when the coordinates key changes.
pub fn request_home_weather(
    tx: &std::sync::mpsc::Sender<HomeMessage>,
    handle: &Handle,
    client: Arc<WeatherClient>,
    key: String,
    coordinates: Coordinates,
    cancel: CancellationToken,
) {
    let tx = tx.clone();
    handle.spawn(async move {
        let result = client
            .fetch_current_weather(coordinates.latitude, coordinates.longitude, &cancel)
            .await;
        let _ = tx.send(HomeMessage::FetchDone { key, result });
    });
}

/// Request the one-shot device-location resolution.
pub fn request_location(
    tx: &std::sync::mpsc::Sender<HomeMessage>,
    handle: &Handle,
    provider: Arc<dyn LocationProvider>,
) {
    let tx = tx.clone();
    handle.spawn(async move {
        let result = provider.resolve().await;
        let _ = tx.send(HomeMessage::LocationDone(result));
    });
}
