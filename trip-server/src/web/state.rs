//! Application state for the web layer.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::MapDefaults;
use crate::dispatch::TripDispatcher;
use crate::geocode::Geocoder;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Trip dispatcher wrapping the directions provider
    pub dispatcher: Arc<TripDispatcher>,

    /// Reverse geocoder; `None` when running without a live API key
    pub geocoder: Option<Arc<dyn Geocoder>>,

    /// Offset for `datetime-local` values when the page doesn't send one
    pub default_utc_offset: FixedOffset,

    /// Initial map view
    pub map: MapDefaults,
}

impl AppState {
    /// Create a new app state.
    pub fn new(dispatcher: TripDispatcher, default_utc_offset: FixedOffset) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            geocoder: None,
            default_utc_offset,
            map: MapDefaults::default(),
        }
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_map(mut self, map: MapDefaults) -> Self {
        self.map = map;
        self
    }
}
