//! Provider status codes and their user-facing messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome code of a directions lookup.
///
/// Codes we don't recognise are kept in [`DirectionsStatus::Other`] so a new
/// provider status never fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum DirectionsStatus {
    Ok,
    NotFound,
    ZeroResults,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Other(String),
}

impl DirectionsStatus {
    /// The wire code, e.g. `"ZERO_RESULTS"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::NotFound => "NOT_FOUND",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(code) => code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Message shown to the user when a lookup ends with this status.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Ok => "Route found.",
            Self::NotFound => {
                "Sorry! We couldn't find at least one of the specified locations in your request."
            }
            Self::ZeroResults => {
                "Sorry! No route could be found between your origin and destination."
            }
            Self::InvalidRequest => "Sorry! The request provided was invalid.",
            Self::OverQueryLimit => {
                "Sorry! You have sent too many requests in a given time. Please try again later."
            }
            Self::RequestDenied => "Sorry! You don't have access to use the directions service.",
            Self::UnknownError => "Whoops! We don't know what went wrong.",
            Self::Other(_) => {
                "Sorry! The directions service returned a response we didn't understand."
            }
        }
    }
}

impl From<String> for DirectionsStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "OK" => Self::Ok,
            "NOT_FOUND" => Self::NotFound,
            "ZERO_RESULTS" => Self::ZeroResults,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "UNKNOWN_ERROR" => Self::UnknownError,
            _ => Self::Other(code),
        }
    }
}

impl From<DirectionsStatus> for String {
    fn from(status: DirectionsStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DirectionsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
