//! The trip dispatcher.
//!
//! Turns a validated trip into exactly one directions request, runs it and
//! classifies the result. Each browser session has at most one request in
//! flight: submitting again aborts the earlier request so a slow stale reply
//! can never overwrite a newer one.

mod dispatcher;
mod session;

pub use dispatcher::{DispatchOutcome, TripDispatcher};
pub use session::{DispatchState, SessionRegistry};
