//! Askama templates for the planning page.

use askama::Template;

use crate::config::MapDefaults;
use crate::domain::{RoutePreference, TimingMode};
use crate::geocode::GeolocationError;

use super::dto::ItineraryResult;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Planning page with the trip form and map.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub modes: Vec<OptionView>,
    pub preferences: Vec<OptionView>,
    pub geolocation_messages: Vec<MessageView>,
    pub map: MapDefaults,
}

impl IndexTemplate {
    pub fn new(map: MapDefaults) -> Self {
        let modes = TimingMode::all()
            .iter()
            .map(|m| OptionView {
                value: m.form_value().to_string(),
                label: m.label().to_string(),
                needs_time: m.requires_time(),
            })
            .collect();

        let preferences = RoutePreference::all()
            .iter()
            .map(|p| OptionView {
                value: p.as_query_value().to_string(),
                label: p.label().to_string(),
                needs_time: false,
            })
            .collect();

        let geolocation_messages = GeolocationError::all()
            .iter()
            .map(|e| MessageView {
                code: e.code().to_string(),
                message: e.user_message().to_string(),
            })
            .collect();

        Self {
            modes,
            preferences,
            geolocation_messages,
            map,
        }
    }
}

// ============================================================================
// Fragment Templates (fetch responses, no base.html)
// ============================================================================

/// Itinerary fragment for a planned trip.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub itinerary: ItineraryResult,
    /// Route geometry as JSON for the map script
    pub path_json: String,
}

impl ItineraryTemplate {
    pub fn new(itinerary: ItineraryResult) -> Self {
        let path_json = serde_json::to_string(&itinerary.path).unwrap_or_else(|_| "[]".into());
        Self {
            itinerary,
            path_json,
        }
    }
}

/// Error fragment; the page script alerts `message`.
#[derive(Template)]
#[template(path = "trip_error.html")]
pub struct TripErrorTemplate {
    pub message: String,
    pub status: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One `<option>` in a form selector.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    /// Whether choosing this option reveals the date/time field
    pub needs_time: bool,
}

/// A coded message the page script looks up by `code`.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub code: String,
    pub message: String,
}
