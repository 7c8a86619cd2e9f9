//! Directions client error types.

use super::status::DirectionsStatus;

/// Errors from a directions lookup.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid directions JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Provider answered with a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider answered, but the lookup failed
    #[error("directions lookup failed: {status}")]
    Status {
        status: DirectionsStatus,
        message: Option<String>,
    },

    /// Client is missing configuration (API key, mock data, ...)
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl DirectionsError {
    /// The provider status to report to the user.
    ///
    /// Transport and parsing failures have no status of their own and are
    /// reported as [`DirectionsStatus::UnknownError`].
    pub fn status(&self) -> DirectionsStatus {
        match self {
            DirectionsError::Status { status, .. } => status.clone(),
            _ => DirectionsStatus::UnknownError,
        }
    }
}
