//! Reverse geocoding for the "use my location" button.
//!
//! The browser only knows coordinates. Turning them into a street address
//! needs the provider's geocoding API, which needs the API key, so the lookup
//! runs here rather than in the page.

mod client;
mod error;
mod geolocation;
mod types;

pub use client::{GeocodeClient, GeocodeConfig, Geocoder};
pub use error::GeocodeError;
pub use geolocation::GeolocationError;
pub use types::{GeocodeResponse, GeocodeResult};
