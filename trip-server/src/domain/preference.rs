//! Route preference hints passed through to the directions provider.

use std::fmt;

use serde::Serialize;

/// Error returned when a route preference is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route preference: {0:?}")]
pub struct InvalidRoutePreference(String);

/// Optional hint biasing how the provider picks between transit itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutePreference {
    /// Prefer itineraries with the fewest changes of vehicle.
    FewerTransfers,
    /// Prefer itineraries with the least walking.
    LessWalking,
}

impl RoutePreference {
    /// Parse a preference from a form value.
    ///
    /// An empty (or whitespace-only) value means "no preference" and yields
    /// `Ok(None)`; the request then omits the field entirely.
    pub fn parse(s: &str) -> Result<Option<Self>, InvalidRoutePreference> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let key = trimmed.to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "fewer_transfers" | "fewest_transfers" => Ok(Some(Self::FewerTransfers)),
            "less_walking" => Ok(Some(Self::LessWalking)),
            _ => Err(InvalidRoutePreference(trimmed.to_string())),
        }
    }

    /// The provider's REST query value.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::FewerTransfers => "fewer_transfers",
            Self::LessWalking => "less_walking",
        }
    }

    /// Label shown in the preference selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FewerTransfers => "Fewer transfers",
            Self::LessWalking => "Less walking",
        }
    }

    /// All preferences, in selector order.
    pub fn all() -> [Self; 2] {
        [Self::FewerTransfers, Self::LessWalking]
    }
}

impl fmt::Display for RoutePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FewerTransfers => "FEWER_TRANSFERS",
            Self::LessWalking => "LESS_WALKING",
        })
    }
}
