//! Geocoding API response DTOs.

use serde::Deserialize;

/// Reply to a reverse geocoding request.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,

    /// Candidate addresses, most specific first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub place_id: Option<String>,

    /// e.g. `["street_address"]`, `["route"]`, `["plus_code"]`.
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResponse {
    /// The address to put in the start field.
    ///
    /// Prefers a street address; plus codes are skipped since the directions
    /// provider handles them poorly.
    pub fn best_address(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.types.iter().any(|t| t == "street_address"))
            .or_else(|| {
                self.results
                    .iter()
                    .find(|r| !r.types.iter().any(|t| t == "plus_code"))
            })
            .map(|r| r.formatted_address.as_str())
    }
}
