//! Application state for SkyScout
//!
//! The favourites list, the home-location slot, and the async service layer
//! that feeds them. A presentation shell owns a [`Session`], drives it with
//! user intents, and re-renders from its state after each [`Session::pump`].

pub mod favourites;
pub mod home;
pub mod service;
pub mod session;
pub mod state;

pub use favourites::{FavouritesStore, CITY_LOOKUP_FAILED};
pub use home::HomeWeatherController;
pub use service::{FavouritesMessage, HomeMessage};
pub use session::Session;
pub use state::{FavouriteCity, WeatherState};
