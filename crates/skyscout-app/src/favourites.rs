//! The favourites list: user-saved cities and their fetch lifecycles.
//!
//! All mutation happens on the owning thread. User intents update the list
//! synchronously and hand work to the service layer; completions come back
//! as [`FavouritesMessage`]s and land through [`FavouritesStore::apply`],
//! which locates its target row by id and discards results whose row is
//! gone.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use uuid::Uuid;

use skyscout_weather::{ClientError, Coordinates, Observation, ResolvedCity, WeatherClient};

use crate::service::{self, FavouritesMessage};
use crate::state::{FavouriteCity, WeatherState};

/// Shown on an entry whose city lookup failed. Such entries keep no
/// coordinates and never refresh.
pub const CITY_LOOKUP_FAILED: &str = "Couldn't look up this city. Check the name and try again.";

pub struct FavouritesStore {
    client: Arc<WeatherClient>,
    handle: Handle,
    tx: Sender<FavouritesMessage>,
    entries: Vec<FavouriteCity>,
    pending_input: String,
}

impl FavouritesStore {
    pub fn new(client: Arc<WeatherClient>, handle: Handle, tx: Sender<FavouritesMessage>) -> Self {
        Self {
            client,
            handle,
            tx,
            entries: Vec::new(),
            pending_input: String::new(),
        }
    }

    /// The list in display order: newest first, then whatever the user
    /// dragged it into.
    pub fn entries(&self) -> &[FavouriteCity] {
        &self.entries
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Mirror of the add-city text field.
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Submit the text field as an add.
    pub fn submit_pending(&mut self) -> Option<Uuid> {
        let text = self.pending_input.clone();
        self.add(&text)
    }

    /// Add a favourite by name.
    ///
    /// Blank input is ignored. A name already in the list (case-insensitive)
    /// clears the text field and does nothing else. Otherwise a loading
    /// placeholder appears at the head immediately and resolution runs in
    /// the background; returns the new row's id.
    pub fn add(&mut self, raw_name: &str) -> Option<Uuid> {
        let name = raw_name.trim();
        if name.is_empty() {
            return None;
        }

        let lowered = name.to_lowercase();
        if self.entries.iter().any(|f| f.label.to_lowercase() == lowered) {
            tracing::debug!(city = name, "already a favourite, ignoring");
            self.pending_input.clear();
            return None;
        }

        let id = Uuid::new_v4();
        self.entries.insert(
            0,
            FavouriteCity {
                id,
                label: name.to_string(),
                coordinates: None,
                weather: WeatherState::Loading,
            },
        );
        self.pending_input.clear();

        service::request_city_resolve(
            &self.tx,
            &self.handle,
            self.client.clone(),
            id,
            name.to_string(),
        );
        Some(id)
    }

    /// Re-fetch one entry's weather. Unknown ids and entries without
    /// coordinates are ignored without issuing a request.
    pub fn refresh(&mut self, id: Uuid) {
        let Some(entry) = self.entries.iter_mut().find(|f| f.id == id) else {
            return;
        };
        let Some(coordinates) = entry.coordinates else {
            tracing::debug!(%id, "refresh on unresolved entry, ignoring");
            return;
        };

        entry.weather = WeatherState::Loading;
        service::request_favourite_weather(
            &self.tx,
            &self.handle,
            self.client.clone(),
            id,
            coordinates,
        );
    }

    /// Remove an entry. In-flight work for it is not cancelled; its
    /// completion finds no row and is discarded.
    pub fn remove(&mut self, id: Uuid) {
        self.entries.retain(|f| f.id != id);
    }

    /// Apply a drag-reorder: the full id sequence in its new order. The
    /// shell sends a permutation of the current ids; ids it doesn't know
    /// are skipped.
    pub fn reorder(&mut self, order: &[Uuid]) {
        let mut reordered = Vec::with_capacity(self.entries.len());
        for id in order {
            if let Some(pos) = self.entries.iter().position(|f| f.id == *id) {
                reordered.push(self.entries.remove(pos));
            }
        }
        self.entries = reordered;
    }

    /// Apply one completion from the service layer.
    pub fn apply(&mut self, message: FavouritesMessage) {
        match message {
            FavouritesMessage::ResolveDone { id, result } => self.apply_resolved(id, result),
            FavouritesMessage::FetchDone { id, result } => self.apply_fetched(id, result),
        }
    }

    fn apply_resolved(&mut self, id: Uuid, result: Result<ResolvedCity, ClientError>) {
        let Some(entry) = self.entries.iter_mut().find(|f| f.id == id) else {
            tracing::debug!(%id, "lookup finished for a removed entry, discarding");
            return;
        };

        match result {
            Ok(resolved) => {
                let coordinates = Coordinates {
                    latitude: resolved.latitude,
                    longitude: resolved.longitude,
                };
                entry.coordinates = Some(coordinates);
                entry.label = resolved.label;

                service::request_favourite_weather(
                    &self.tx,
                    &self.handle,
                    self.client.clone(),
                    id,
                    coordinates,
                );
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "city lookup failed");
                entry.weather = WeatherState::Failed {
                    message: CITY_LOOKUP_FAILED.to_string(),
                };
            }
        }
    }

    fn apply_fetched(&mut self, id: Uuid, result: Result<Observation, ClientError>) {
        if let Err(e) = &result {
            if e.is_cancelled() {
                return;
            }
        }

        let Some(entry) = self.entries.iter_mut().find(|f| f.id == id) else {
            tracing::debug!(%id, "fetch finished for a removed entry, discarding");
            return;
        };

        match result {
            Ok(observation) => entry.weather = WeatherState::Loaded(observation),
            Err(e) => {
                tracing::warn!(%id, error = %e, "weather fetch failed");
                entry.weather = WeatherState::Failed {
                    message: e.user_message(),
                };
            }
        }
    }
}
