//! Transit trip planner server.
//!
//! A web application that turns a start, an end and a "when" into one
//! transit directions request and shows the itinerary the provider returns.

pub mod cache;
pub mod config;
pub mod directions;
pub mod dispatch;
pub mod domain;
pub mod geocode;
pub mod polyline;
pub mod web;
