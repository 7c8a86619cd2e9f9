//! Geocoding error types.

/// Errors from a reverse geocoding lookup.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid geocoding JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider answered with a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No address is known for the coordinates
    #[error("no address found for these coordinates")]
    NoResult,

    /// Provider answered with a failure status
    #[error("geocoding failed: {status}")]
    Status {
        status: String,
        message: Option<String>,
    },

    /// Client is missing configuration
    #[error("not configured: {0}")]
    NotConfigured(String),
}
