//! Directions provider HTTP client.
//!
//! Sends transit requests to the provider's REST endpoint and classifies the
//! reply. The API key is added server-side and never leaves this process.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::Semaphore;

use super::error::DirectionsError;
use super::provider::{DirectionsProvider, classify};
use super::request::DirectionsRequest;
use super::types::DirectionsResponse;

/// Default base URL for the provider's web service APIs.
pub(crate) const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to the production provider)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
///
/// Uses a semaphore to limit concurrent requests so a burst of users can't
/// push the key over its query-rate limit on our side.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl DirectionsClient {
    /// Create a new directions client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        if config.api_key.trim().is_empty() {
            return Err(DirectionsError::NotConfigured(
                "directions API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Request transit directions.
    ///
    /// Returns the reply only if the provider found at least one route;
    /// every other status comes back as [`DirectionsError::Status`].
    pub async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::NotConfigured("semaphore closed".to_string()))?;

        let url = format!("{}/directions/json", self.base_url);

        let mut query = request.query_pairs();
        query.push(("key", self.api_key.clone()));

        tracing::debug!(
            origin = %request.origin,
            destination = %request.destination,
            "requesting transit directions"
        );

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        tracing::debug!(status = %parsed.status, routes = parsed.routes.len(), "directions reply");

        classify(parsed)
    }
}

impl DirectionsProvider for DirectionsClient {
    fn route<'a>(
        &'a self,
        request: &'a DirectionsRequest,
    ) -> BoxFuture<'a, Result<DirectionsResponse, DirectionsError>> {
        Box::pin(self.directions(request))
    }
}
