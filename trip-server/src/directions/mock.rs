//! Mock directions client for development and tests without an API key.
//!
//! Loads canned provider replies from JSON files and serves them as if they
//! were live responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::error::DirectionsError;
use super::provider::{DirectionsProvider, classify};
use super::request::DirectionsRequest;
use super::status::DirectionsStatus;
use super::types::DirectionsResponse;

/// Reply used when no file matches the destination.
const FALLBACK_KEY: &str = "default";

/// Mock directions client that serves replies from JSON files.
///
/// A request is answered with `{key}.json` where `key` is the destination
/// lowercased with runs of non-alphanumerics replaced by `-` (so
/// "200 Ocean Blvd" reads `200-ocean-blvd.json`), falling back to
/// `default.json`. With neither present the reply is `NOT_FOUND`.
#[derive(Clone)]
pub struct MockDirectionsClient {
    replies: Arc<RwLock<HashMap<String, DirectionsResponse>>>,
    /// Only filled after [`with_recording`](Self::with_recording)
    requests: Arc<Mutex<Vec<DirectionsRequest>>>,
    recording: bool,
    delay: Option<Duration>,
}

impl MockDirectionsClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let data_dir = data_dir.as_ref();
        let mut replies = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            DirectionsError::NotConfigured(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                DirectionsError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| {
                DirectionsError::NotConfigured(format!("failed to read {path:?}: {e}"))
            })?;

            let reply: DirectionsResponse =
                serde_json::from_str(&json).map_err(|e| DirectionsError::Json {
                    message: format!("failed to parse {path:?}: {e}"),
                    body: None,
                })?;

            replies.insert(key.to_string(), reply);
        }

        if replies.is_empty() {
            return Err(DirectionsError::NotConfigured(format!(
                "no mock directions files found in {data_dir:?}"
            )));
        }

        Ok(Self::from_replies(replies))
    }

    /// Create a mock client from replies already in memory.
    pub fn from_replies(replies: HashMap<String, DirectionsResponse>) -> Self {
        Self {
            replies: Arc::new(RwLock::new(replies)),
            requests: Arc::new(Mutex::new(Vec::new())),
            recording: false,
            delay: None,
        }
    }

    /// Wait this long before answering, to simulate a slow provider.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Keep every request for [`requests`](Self::requests).
    ///
    /// Off by default: the dev server runs on this client indefinitely.
    pub fn with_recording(mut self) -> Self {
        self.recording = true;
        self
    }

    /// Requests received so far, oldest first. Empty unless recording.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Mock-file key for a destination.
    pub fn key_for(destination: &str) -> String {
        let mut key = String::with_capacity(destination.len());
        for c in destination.chars() {
            if c.is_ascii_alphanumeric() {
                key.push(c.to_ascii_lowercase());
            } else if !key.is_empty() && !key.ends_with('-') {
                key.push('-');
            }
        }
        key.trim_end_matches('-').to_string()
    }

    /// Answer a request from the loaded replies.
    pub async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        if self.recording {
            if let Ok(mut seen) = self.requests.lock() {
                seen.push(request.clone());
            }
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let replies = self.replies.read().await;
        let key = Self::key_for(&request.destination);

        match replies.get(&key).or_else(|| replies.get(FALLBACK_KEY)) {
            Some(reply) => classify(reply.clone()),
            None => Err(DirectionsError::Status {
                status: DirectionsStatus::NotFound,
                message: Some(format!("no mock reply for {key:?}")),
            }),
        }
    }
}

impl DirectionsProvider for MockDirectionsClient {
    fn route<'a>(
        &'a self,
        request: &'a DirectionsRequest,
    ) -> BoxFuture<'a, Result<DirectionsResponse, DirectionsError>> {
        Box::pin(self.directions(request))
    }
}
