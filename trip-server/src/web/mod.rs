//! Web layer for the trip planner.
//!
//! Serves the planning page and the endpoints its script calls.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
