//! Domain types for the trip planner.
//!
//! Every value here is request-scoped: it is built from one form submission,
//! turned into one directions request and then dropped. Types enforce their
//! invariants at construction time, so the request builder can trust them.

mod address;
mod location;
mod preference;
mod timing;
mod trip;

pub use address::{Address, InvalidAddress, normalize_address};
pub use location::{InvalidLatLng, LatLng};
pub use preference::{InvalidRoutePreference, RoutePreference};
pub use timing::{Timing, TimingError, TimingMode, offset_from_minutes, parse_timing_value};
pub use trip::{TripError, TripRequest};
