//! Wires the stores, channels and client into one unit a shell can own.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Handle;

use skyscout_weather::{LocationProvider, WeatherClient};

use crate::favourites::FavouritesStore;
use crate::home::HomeWeatherController;
use crate::service::{self, FavouritesMessage, HomeMessage};

/// The application core. Construct once, call [`Session::start`], then
/// [`Session::pump`] every tick and read state off the stores.
pub struct Session {
    handle: Handle,
    favourites: FavouritesStore,
    home: HomeWeatherController,
    favourites_rx: Receiver<FavouritesMessage>,
    home_rx: Receiver<HomeMessage>,
    home_tx: Sender<HomeMessage>,
}

impl Session {
    pub fn new(client: Arc<WeatherClient>, handle: Handle) -> Self {
        let (favourites_tx, favourites_rx) = mpsc::channel();
        let (home_tx, home_rx) = mpsc::channel();

        Self {
            favourites: FavouritesStore::new(client.clone(), handle.clone(), favourites_tx),
            home: HomeWeatherController::new(client, handle.clone(), home_tx.clone()),
            handle,
            favourites_rx,
            home_rx,
            home_tx,
        }
    }

    /// Kick off the one-shot device-location resolution.
    pub fn start(&self, provider: Arc<dyn LocationProvider>) {
        service::request_location(&self.home_tx, &self.handle, provider);
    }

    /// Drain and apply pending completions. Non-blocking; returns how many
    /// messages were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.favourites_rx.try_recv() {
            self.favourites.apply(message);
            applied += 1;
        }
        while let Ok(message) = self.home_rx.try_recv() {
            self.home.apply(message);
            applied += 1;
        }
        applied
    }

    pub fn favourites(&self) -> &FavouritesStore {
        &self.favourites
    }

    pub fn favourites_mut(&mut self) -> &mut FavouritesStore {
        &mut self.favourites
    }

    pub fn home(&self) -> &HomeWeatherController {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomeWeatherController {
        &mut self.home
    }
}
