//! Browser geolocation failures.
//!
//! These happen entirely in the page, but the wording lives here with the
//! other user-facing messages and is rendered into the page at load.

/// Why the browser could not supply the user's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeolocationError {
    /// The user (or browser policy) refused location access.
    PermissionDenied,
    /// The browser has no geolocation support.
    Unsupported,
    /// Supported and allowed, but no fix arrived (no signal, timed out).
    Unavailable,
}

impl GeolocationError {
    /// Identifier the page script uses to look the message up.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::Unsupported => "unsupported",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Sorry! We couldn't get your location. Please allow location access or type your start address."
            }
            Self::Unsupported => "Sorry! Your browser doesn't support geolocation.",
            Self::Unavailable => {
                "Sorry! We couldn't find your location right now. Please try again or type your start address."
            }
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::PermissionDenied, Self::Unsupported, Self::Unavailable]
    }
}
