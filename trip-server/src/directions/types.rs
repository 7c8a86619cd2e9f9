//! Directions provider response DTOs.
//!
//! These types map directly to the provider's JSON reply. Fields are
//! `Option` or `#[serde(default)]` wherever the provider omits them for some
//! step kinds (walking steps have no transit details, for instance).

use serde::Deserialize;

use super::status::DirectionsStatus;

/// Top-level reply to a directions request.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// Outcome of the lookup. Anything other than `OK` carries no routes.
    pub status: DirectionsStatus,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Provider diagnostic text, present on some failures.
    pub error_message: Option<String>,

    /// How origin and destination were geocoded.
    #[serde(default)]
    pub geocoded_waypoints: Vec<GeocodedWaypoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodedWaypoint {
    pub geocoder_status: Option<String>,
    pub place_id: Option<String>,
}

/// One itinerary from origin to destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub legs: Vec<Leg>,

    /// Encoded path of the whole route, for drawing on a map.
    pub overview_polyline: Option<EncodedPolyline>,

    pub copyrights: Option<String>,

    #[serde(default)]
    pub warnings: Vec<String>,

    /// Total fare, when the agency publishes one.
    pub fare: Option<Fare>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fare {
    pub currency: String,
    pub text: String,
    pub value: f64,
}

/// Journey between two waypoints. Transit requests have a single leg.
#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub start_address: String,

    #[serde(default)]
    pub end_address: String,

    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub departure_time: Option<TimeText>,
    pub arrival_time: Option<TimeText>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A quantity with the provider's localized rendering, e.g. `{"text": "5 mins", "value": 300}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: i64,
}

/// A wall-clock time: display text plus Unix seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeText {
    pub text: String,
    pub time_zone: Option<String>,
    pub value: i64,
}

/// One instruction within a leg: a walk or a transit ride.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Instruction text; contains inline HTML markup.
    pub html_instructions: Option<String>,

    /// `"WALKING"` or `"TRANSIT"`.
    #[serde(default)]
    pub travel_mode: String,

    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,

    /// Present only for transit steps.
    pub transit_details: Option<TransitDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitDetails {
    pub departure_stop: Option<Stop>,
    pub arrival_stop: Option<Stop>,
    pub departure_time: Option<TimeText>,
    pub arrival_time: Option<TimeText>,

    /// Direction shown on the vehicle, e.g. "Downtown".
    pub headsign: Option<String>,

    /// Number of stops ridden, excluding the boarding stop.
    pub num_stops: Option<u32>,

    pub line: Option<Line>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stop {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Line {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,

    #[serde(default)]
    pub agencies: Vec<Agency>,

    pub vehicle: Option<Vehicle>,
}

impl Line {
    /// Short name if published, else the long name.
    pub fn display_name(&self) -> Option<&str> {
        self.short_name.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Agency {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_reply() {
        let json = r#"{"status": "ZERO_RESULTS", "routes": [], "geocoded_waypoints": [{"geocoder_status": "OK", "place_id": "abc"}]}"#;
        let resp: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, DirectionsStatus::ZeroResults);
        assert!(resp.routes.is_empty());
        assert_eq!(resp.geocoded_waypoints.len(), 1);
    }

    #[test]
    fn parse_minimal_reply() {
        let resp: DirectionsResponse =
            serde_json::from_str(r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#)
                .unwrap();
        assert_eq!(resp.status, DirectionsStatus::RequestDenied);
        assert_eq!(resp.error_message.as_deref(), Some("bad key"));
    }

    #[test]
    fn parse_transit_step() {
        let json = r#"{
            "travel_mode": "TRANSIT",
            "html_instructions": "Bus towards Downtown",
            "duration": {"text": "12 mins", "value": 720},
            "transit_details": {
                "departure_stop": {"name": "Main / 1st"},
                "arrival_stop": {"name": "Ocean / Pine"},
                "headsign": "Downtown",
                "num_stops": 6,
                "line": {
                    "short_name": "1",
                    "name": "Long Beach Blvd",
                    "vehicle": {"name": "Bus", "type": "BUS"},
                    "agencies": [{"name": "Long Beach Transit"}]
                }
            }
        }"#;
        let step: Step = serde_json::from_str(json).unwrap();
        let details = step.transit_details.unwrap();
        assert_eq!(details.num_stops, Some(6));
        let line = details.line.unwrap();
        assert_eq!(line.display_name(), Some("1"));
        assert_eq!(line.vehicle.unwrap().kind.as_deref(), Some("BUS"));
        assert_eq!(line.agencies[0].name, "Long Beach Transit");
    }

    #[test]
    fn line_display_name_falls_back() {
        let line = Line {
            name: Some("Crosstown".into()),
            short_name: None,
            color: None,
            text_color: None,
            agencies: vec![],
            vehicle: None,
        };
        assert_eq!(line.display_name(), Some("Crosstown"));
    }
}
