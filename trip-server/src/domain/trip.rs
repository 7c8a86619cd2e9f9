//! A validated trip request built from one form submission.

use chrono::FixedOffset;

use super::address::{Address, InvalidAddress};
use super::preference::{InvalidRoutePreference, RoutePreference};
use super::timing::{Timing, TimingError, TimingMode};

/// Validation errors for a trip submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    #[error("start location: {0}")]
    Origin(InvalidAddress),

    #[error("end location: {0}")]
    Destination(InvalidAddress),

    #[error(transparent)]
    Timing(#[from] TimingError),

    #[error(transparent)]
    Preference(#[from] InvalidRoutePreference),
}

/// Everything needed to build one directions request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub origin: Address,
    pub destination: Address,
    pub timing: Timing,
    pub preference: Option<RoutePreference>,
}

impl TripRequest {
    /// Validate the raw form fields.
    ///
    /// `offset` is used to interpret `datetime-local` values that carry no
    /// offset of their own.
    pub fn from_form(
        start: &str,
        end: &str,
        when: &str,
        datetime: Option<&str>,
        preference: Option<&str>,
        offset: FixedOffset,
    ) -> Result<Self, TripError> {
        let origin = Address::parse(start).map_err(TripError::Origin)?;
        let destination = Address::parse(end).map_err(TripError::Destination)?;
        let mode = TimingMode::parse(when)?;
        let timing = Timing::resolve(mode, datetime, offset)?;
        let preference = match preference {
            Some(p) => RoutePreference::parse(p)?,
            None => None,
        };

        Ok(Self {
            origin,
            destination,
            timing,
            preference,
        })
    }
}
