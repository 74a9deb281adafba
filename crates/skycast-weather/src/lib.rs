//! Weather lookups for Skycast
//!
//! Talks to OpenWeatherMap for current conditions and to an IP-side
//! geolocation service for the "my location" pane.

pub mod client;
pub mod error;
pub mod locate;
pub mod types;

pub use client::WeatherClient;
pub use error::{FetchError, LocateError};
pub use locate::GeoLocator;
pub use types::{glyph_for, Condition, Coordinates, Reading};
