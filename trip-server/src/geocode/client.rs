//! Reverse geocoding HTTP client.

use std::time::Duration;

use futures::future::BoxFuture;

use crate::directions::DirectionsConfig;
use crate::domain::{LatLng, normalize_address};

use super::error::GeocodeError;
use super::types::GeocodeResponse;

/// Something that can turn coordinates into an address.
pub trait Geocoder: Send + Sync {
    /// Resolve `at` to a normalized street address.
    fn reverse(&self, at: LatLng) -> BoxFuture<'_, Result<String, GeocodeError>>;
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: crate::directions::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl From<&DirectionsConfig> for GeocodeConfig {
    /// Same key, host and timeout as directions; geocoding is a separate
    /// endpoint on the same host.
    fn from(config: &DirectionsConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout_secs)
    }
}

/// Geocoding API client.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        if config.api_key.trim().is_empty() {
            return Err(GeocodeError::NotConfigured(
                "geocoding API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw reverse geocoding reply for a coordinate pair.
    pub async fn reverse_raw(&self, at: LatLng) -> Result<GeocodeResponse, GeocodeError> {
        let url = format!("{}/geocode/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("latlng", at.to_string()), ("key", self.api_key.clone())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })
    }

    /// Resolve coordinates to a normalized address.
    pub async fn reverse_address(&self, at: LatLng) -> Result<String, GeocodeError> {
        let reply = self.reverse_raw(at).await?;
        address_from_reply(reply)
    }
}

impl Geocoder for GeocodeClient {
    fn reverse(&self, at: LatLng) -> BoxFuture<'_, Result<String, GeocodeError>> {
        Box::pin(self.reverse_address(at))
    }
}

/// Pick the address out of a reply, mapping failure statuses to errors.
fn address_from_reply(reply: GeocodeResponse) -> Result<String, GeocodeError> {
    match reply.status.as_str() {
        "OK" => reply
            .best_address()
            .map(normalize_address)
            .ok_or(GeocodeError::NoResult),
        "ZERO_RESULTS" => Err(GeocodeError::NoResult),
        _ => Err(GeocodeError::Status {
            status: reply.status,
            message: reply.error_message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn config_from_directions_config() {
        let directions = DirectionsConfig::new("k")
            .with_base_url("http://localhost:9000")
            .with_timeout(45);
        let config = GeocodeConfig::from(&directions);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn standalone_config_defaults() {
        let config = GeocodeConfig::new("k");
        assert_eq!(config.base_url, crate::directions::DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(
            GeocodeClient::new(GeocodeConfig::new("")),
            Err(GeocodeError::NotConfigured(_))
        ));
    }

    #[test]
    fn address_is_normalized() {
        let reply = parse(
            r#"{"status": "OK", "results": [
                {"formatted_address": "100 Main St, Long Beach, CA 90802, USA", "types": ["street_address"]}
            ]}"#,
        );
        assert_eq!(
            address_from_reply(reply).unwrap(),
            "100 Main St, Long Beach, CA 90802"
        );
    }

    #[test]
    fn zero_results_is_no_result() {
        let reply = parse(r#"{"status": "ZERO_RESULTS", "results": []}"#);
        assert!(matches!(address_from_reply(reply), Err(GeocodeError::NoResult)));
    }

    #[test]
    fn denied_is_status_error() {
        let reply = parse(r#"{"status": "REQUEST_DENIED", "error_message": "key restricted"}"#);
        match address_from_reply(reply) {
            Err(GeocodeError::Status { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("key restricted"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
