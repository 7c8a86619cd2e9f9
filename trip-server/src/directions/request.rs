//! Outbound directions request construction.
//!
//! [`build_request`] is a pure function of the trip and the current time, so
//! every timing/preference combination can be checked without a network.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{RoutePreference, Timing, TripRequest};

/// Travel mode sent to the provider. Trips are always planned on transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Transit,
}

impl TravelMode {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::Transit => "transit",
        }
    }
}

/// Transit vehicle filter. Only buses are planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Bus,
}

impl TransitMode {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::Bus => "bus",
        }
    }
}

/// Transit-specific request options.
///
/// Exactly one of `departure_time` and `arrival_time` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitOptions {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub departure_time: Option<DateTime<Utc>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub arrival_time: Option<DateTime<Utc>>,

    pub modes: Vec<TransitMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_preference: Option<RoutePreference>,
}

/// A single outbound directions request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub travel_mode: TravelMode,
    pub transit_options: TransitOptions,
}

impl DirectionsRequest {
    /// Query parameters for the provider's REST endpoint (without the key).
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let opts = &self.transit_options;
        let mut pairs = vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("mode", self.travel_mode.as_query_value().to_string()),
            (
                "transit_mode",
                opts.modes
                    .iter()
                    .map(TransitMode::as_query_value)
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
        ];

        if let Some(t) = opts.departure_time {
            pairs.push(("departure_time", t.timestamp().to_string()));
        }
        if let Some(t) = opts.arrival_time {
            pairs.push(("arrival_time", t.timestamp().to_string()));
        }
        if let Some(pref) = opts.routing_preference {
            pairs.push(("transit_routing_preference", pref.as_query_value().to_string()));
        }

        pairs
    }
}

/// Build the provider request for a trip.
///
/// `now` is the departure time used for [`Timing::Immediate`].
pub fn build_request(trip: &TripRequest, now: DateTime<Utc>) -> DirectionsRequest {
    let (departure_time, arrival_time) = match trip.timing {
        Timing::Immediate => (Some(now), None),
        Timing::DepartAt(t) => (Some(t.with_timezone(&Utc)), None),
        Timing::ArriveAt(t) => (None, Some(t.with_timezone(&Utc))),
    };

    DirectionsRequest {
        origin: trip.origin.as_str().to_string(),
        destination: trip.destination.as_str().to_string(),
        travel_mode: TravelMode::Transit,
        transit_options: TransitOptions {
            departure_time,
            arrival_time,
            modes: vec![TransitMode::Bus],
            routing_preference: trip.preference,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, TimingMode};
    use chrono::{FixedOffset, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 17, 0, 0).unwrap()
    }

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 14, 30, 0)
            .unwrap()
    }

    fn trip(timing: Timing, preference: Option<RoutePreference>) -> TripRequest {
        TripRequest {
            origin: Address::parse("100 Main St").unwrap(),
            destination: Address::parse("200 Ocean Blvd").unwrap(),
            timing,
            preference,
        }
    }

    #[test]
    fn transit_bus_in_every_mode() {
        for timing in [Timing::Immediate, Timing::DepartAt(at()), Timing::ArriveAt(at())] {
            let req = build_request(&trip(timing, None), now());
            assert_eq!(req.travel_mode, TravelMode::Transit);
            assert_eq!(req.transit_options.modes, vec![TransitMode::Bus]);
        }
    }

    #[test]
    fn immediate_departs_now() {
        let req = build_request(&trip(Timing::Immediate, None), now());
        assert_eq!(req.transit_options.departure_time, Some(now()));
        assert_eq!(req.transit_options.arrival_time, None);
    }

    #[test]
    fn depart_at_sets_only_departure() {
        let req = build_request(&trip(Timing::DepartAt(at()), None), now());
        assert_eq!(
            req.transit_options.departure_time,
            Some(at().with_timezone(&Utc))
        );
        assert_eq!(req.transit_options.arrival_time, None);

        let json = serde_json::to_value(&req).unwrap();
        assert!(json["transitOptions"].get("arrivalTime").is_none());
        assert_eq!(json["transitOptions"]["departureTime"], at().timestamp());
    }

    #[test]
    fn arrive_at_sets_only_arrival() {
        let req = build_request(&trip(Timing::ArriveAt(at()), None), now());
        assert_eq!(req.transit_options.departure_time, None);
        assert_eq!(
            req.transit_options.arrival_time,
            Some(at().with_timezone(&Utc))
        );

        let json = serde_json::to_value(&req).unwrap();
        assert!(json["transitOptions"].get("departureTime").is_none());
    }

    #[test]
    fn preference_present_iff_supplied() {
        let req = build_request(&trip(Timing::Immediate, None), now());
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["transitOptions"].get("routingPreference").is_none());
        assert!(!req.query_pairs().iter().any(|(k, _)| *k == "transit_routing_preference"));

        let req = build_request(
            &trip(Timing::Immediate, Some(RoutePreference::FewerTransfers)),
            now(),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["transitOptions"]["routingPreference"], "FEWER_TRANSFERS");
        assert!(
            req.query_pairs()
                .contains(&("transit_routing_preference", "fewer_transfers".to_string()))
        );
    }

    #[test]
    fn serialized_shape() {
        let req = build_request(&trip(Timing::Immediate, None), now());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["origin"], "100 Main St");
        assert_eq!(json["destination"], "200 Ocean Blvd");
        assert_eq!(json["travelMode"], "TRANSIT");
        assert_eq!(json["transitOptions"]["modes"][0], "BUS");
    }

    #[test]
    fn query_pairs_for_arrival() {
        let req = build_request(&trip(Timing::ArriveAt(at()), None), now());
        let pairs = req.query_pairs();
        assert!(pairs.contains(&("mode", "transit".to_string())));
        assert!(pairs.contains(&("transit_mode", "bus".to_string())));
        assert!(pairs.contains(&("arrival_time", at().timestamp().to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "departure_time"));
    }

    #[test]
    fn end_to_end_leave_now_scenario() {
        let trip = TripRequest::from_form(
            "100 Main St, USA",
            "200 Ocean Blvd",
            "any",
            None,
            Some(""),
            FixedOffset::east_opt(0).unwrap(),
        )
        .unwrap();
        assert_eq!(trip.timing.mode(), TimingMode::Immediate);

        let before = Utc::now();
        let req = build_request(&trip, Utc::now());
        let after = Utc::now();

        assert_eq!(req.origin, "100 Main St");
        assert_eq!(req.destination, "200 Ocean Blvd");
        let departure = req.transit_options.departure_time.unwrap();
        assert!(departure >= before && departure <= after);
        assert!(req.transit_options.routing_preference.is_none());
    }
}
