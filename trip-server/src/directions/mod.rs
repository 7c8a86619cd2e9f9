//! Directions provider client.
//!
//! This module builds the outbound transit request from a validated
//! [`TripRequest`](crate::domain::TripRequest), sends it to the provider's
//! REST endpoint and classifies the reply.
//!
//! Key characteristics of the provider:
//! - HTTP 200 is returned even for failed lookups; the outcome lives in the
//!   `status` field of the body
//! - Times are Unix seconds in the query and `{text, value}` pairs in the reply
//! - Only the fields we render are modelled; everything else is ignored

mod client;
mod error;
mod mock;
mod provider;
mod request;
mod status;
mod types;

pub(crate) use client::DEFAULT_BASE_URL;
pub use client::{DirectionsClient, DirectionsConfig};
pub use error::DirectionsError;
pub use mock::MockDirectionsClient;
pub use provider::DirectionsProvider;
pub use request::{DirectionsRequest, TransitMode, TransitOptions, TravelMode, build_request};
pub use status::DirectionsStatus;
pub use types::{
    Agency, DirectionsResponse, EncodedPolyline, Fare, GeocodedWaypoint, Leg, Line, Route, Step,
    Stop, TextValue, TimeText, TransitDetails, Vehicle,
};
