//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directions::{DirectionsRequest, Route, Step, TransitDetails};
use crate::dispatch::DispatchState;
use crate::domain::LatLng;
use crate::polyline;

/// Trip planning form submission.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Page instance identifier; a newer submission with the same value
    /// supersedes an older one still in flight
    pub session: Option<String>,

    /// Start address or "lat,lng"
    pub start: String,

    /// End address or "lat,lng"
    pub end: String,

    /// Timing mode: "any", "depart" or "arrive"
    pub when: String,

    /// `datetime-local` or RFC 3339 value; required for "arrive"
    pub datetime: Option<String>,

    /// Client's offset east of UTC in minutes
    pub utc_offset_minutes: Option<i32>,

    /// Route preference, empty for none
    pub preference: Option<String>,
}

/// Response for a planned trip.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// The request that was sent to the provider
    pub request: DirectionsRequest,

    /// The best route
    pub itinerary: ItineraryResult,
}

/// A route, flattened for display.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub summary: String,
    pub start_address: String,
    pub end_address: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub distance: Option<String>,
    pub fare: Option<String>,
    pub steps: Vec<StepResult>,

    /// Decoded route geometry for the map
    pub path: Vec<LatLng>,

    pub warnings: Vec<String>,
    pub copyrights: Option<String>,
}

/// One walking or transit instruction.
#[derive(Debug, Serialize)]
pub struct StepResult {
    /// "WALKING" or "TRANSIT"
    pub travel_mode: String,

    /// Instruction with markup removed
    pub instructions: String,

    pub duration: Option<String>,
    pub distance: Option<String>,
    pub transit: Option<TransitResult>,
}

/// The ride part of a transit step.
#[derive(Debug, Serialize)]
pub struct TransitResult {
    pub line: Option<String>,
    pub vehicle: Option<String>,
    pub agency: Option<String>,
    pub headsign: Option<String>,
    pub departure_stop: Option<String>,
    pub arrival_stop: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub num_stops: Option<u32>,
    pub color: Option<String>,
    pub text_color: Option<String>,
}

/// Query for a session's dispatch state.
#[derive(Debug, Deserialize)]
pub struct SessionStateQuery {
    pub session: String,
}

/// A session's dispatch state.
#[derive(Debug, Serialize)]
pub struct SessionStateResponse {
    pub session: String,
    pub state: DispatchState,
}

/// Query for reverse geocoding.
///
/// Kept as raw strings so a bad number gets our JSON error body rather than
/// the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReverseGeocodeQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Address for a coordinate pair.
#[derive(Debug, Serialize)]
pub struct ReverseGeocodeResponse {
    pub address: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Message to show the user
    pub error: String,

    /// Provider status code, for directions failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// Conversion implementations

impl ItineraryResult {
    /// Create from a provider route.
    ///
    /// A route whose geometry can't be decoded is still shown, just without
    /// a line on the map.
    pub fn from_route(route: &Route) -> Self {
        let leg = route.legs.first();

        let path = route
            .overview_polyline
            .as_ref()
            .map(|p| {
                polyline::decode(&p.points).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "undecodable route polyline");
                    Vec::new()
                })
            })
            .unwrap_or_default();

        Self {
            summary: route.summary.clone(),
            start_address: leg.map(|l| l.start_address.clone()).unwrap_or_default(),
            end_address: leg.map(|l| l.end_address.clone()).unwrap_or_default(),
            departure_time: leg.and_then(|l| l.departure_time.as_ref()).map(|t| t.text.clone()),
            arrival_time: leg.and_then(|l| l.arrival_time.as_ref()).map(|t| t.text.clone()),
            duration: leg.and_then(|l| l.duration.as_ref()).map(|d| d.text.clone()),
            distance: leg.and_then(|l| l.distance.as_ref()).map(|d| d.text.clone()),
            fare: route.fare.as_ref().map(|f| f.text.clone()),
            steps: route
                .legs
                .iter()
                .flat_map(|l| l.steps.iter())
                .map(StepResult::from_step)
                .collect(),
            path,
            warnings: route.warnings.clone(),
            copyrights: route.copyrights.clone(),
        }
    }
}

impl StepResult {
    /// Create from a provider step.
    pub fn from_step(step: &Step) -> Self {
        Self {
            travel_mode: step.travel_mode.clone(),
            instructions: step
                .html_instructions
                .as_deref()
                .map(plain_text)
                .unwrap_or_default(),
            duration: step.duration.as_ref().map(|d| d.text.clone()),
            distance: step.distance.as_ref().map(|d| d.text.clone()),
            transit: step.transit_details.as_ref().map(TransitResult::from_details),
        }
    }

    pub fn is_transit(&self) -> bool {
        self.transit.is_some()
    }
}

impl TransitResult {
    /// Create from provider transit details.
    pub fn from_details(details: &TransitDetails) -> Self {
        let line = details.line.as_ref();
        Self {
            line: line.and_then(|l| l.display_name()).map(str::to_string),
            vehicle: line
                .and_then(|l| l.vehicle.as_ref())
                .and_then(|v| v.name.clone()),
            agency: line
                .and_then(|l| l.agencies.first())
                .map(|a| a.name.clone()),
            headsign: details.headsign.clone(),
            departure_stop: details.departure_stop.as_ref().map(|s| s.name.clone()),
            arrival_stop: details.arrival_stop.as_ref().map(|s| s.name.clone()),
            departure_time: details.departure_time.as_ref().map(|t| t.text.clone()),
            arrival_time: details.arrival_time.as_ref().map(|t| t.text.clone()),
            num_stops: details.num_stops,
            color: line.and_then(|l| l.color.clone()),
            text_color: line.and_then(|l| l.text_color.clone()),
        }
    }
}

/// Strip markup from provider instruction text.
///
/// Tags are dropped and the handful of entities the provider emits are
/// decoded. The result is escaped again when rendered.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match (c, in_tag) {
            ('<', _) => {
                in_tag = true;
                // Block-level tags separate sentences in the provider's output
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            ('>', true) => in_tag = false,
            (_, true) => {}
            (c, false) => out.push(c),
        }
    }

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::DirectionsResponse;

    fn mock_route() -> Route {
        let json = std::fs::read_to_string("data/mock_directions/default.json").unwrap();
        let resp: DirectionsResponse = serde_json::from_str(&json).unwrap();
        resp.routes.into_iter().next().unwrap()
    }

    #[test]
    fn plain_text_strips_tags() {
        assert_eq!(
            plain_text("Walk to <b>Long Beach Blvd &amp; 1st St</b>"),
            "Walk to Long Beach Blvd & 1st St"
        );
        assert_eq!(
            plain_text("Turn <b>left</b><div style=\"font-size:0.9em\">Destination on the right</div>"),
            "Turn left Destination on the right"
        );
        assert_eq!(plain_text("No markup"), "No markup");
    }

    #[test]
    fn itinerary_from_mock_route() {
        let itinerary = ItineraryResult::from_route(&mock_route());

        assert_eq!(itinerary.start_address, "100 Main St, Long Beach, CA 90802");
        assert_eq!(itinerary.duration.as_deref(), Some("18 mins"));
        assert_eq!(itinerary.fare.as_deref(), Some("$1.25"));
        assert_eq!(itinerary.steps.len(), 3);
        assert_eq!(itinerary.path.len(), 5);

        let bus = &itinerary.steps[1];
        assert!(bus.is_transit());
        let transit = bus.transit.as_ref().unwrap();
        assert_eq!(transit.line.as_deref(), Some("1"));
        assert_eq!(transit.agency.as_deref(), Some("Long Beach Transit"));
        assert_eq!(transit.num_stops, Some(6));
        assert!(!itinerary.steps[0].is_transit());
    }

    #[test]
    fn bad_polyline_gives_empty_path() {
        let mut route = mock_route();
        route.overview_polyline = Some(crate::directions::EncodedPolyline {
            points: "_".into(),
        });
        let itinerary = ItineraryResult::from_route(&route);
        assert!(itinerary.path.is_empty());
        assert_eq!(itinerary.steps.len(), 3);
    }

    #[test]
    fn plan_request_minimal_json() {
        let req: PlanTripRequest = serde_json::from_str(
            r#"{"start": "100 Main St, USA", "end": "200 Ocean Blvd", "when": "any"}"#,
        )
        .unwrap();
        assert!(req.session.is_none());
        assert!(req.datetime.is_none());
        assert!(req.preference.is_none());
    }

    #[test]
    fn error_response_omits_missing_status() {
        let json = serde_json::to_value(ErrorResponse {
            error: "bad".into(),
            status: None,
        })
        .unwrap();
        assert!(json.get("status").is_none());
    }
}
