//! Caching layer for reverse geocoding.
//!
//! A phone reporting its position repeatedly from the same spot would
//! otherwise cost one provider call per tap. Coordinates are rounded to five
//! decimal places (about a metre) so jittery fixes share an entry.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;

use crate::domain::LatLng;
use crate::geocode::{GeocodeError, Geocoder};

/// Cache key: latitude and longitude scaled by 1e5.
type CoordKey = (i64, i64);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches successful lookups. Failures are not
/// cached, so a transient provider error doesn't stick.
pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    addresses: MokaCache<CoordKey, String>,
}

impl CachedGeocoder {
    /// Create a new cached geocoder.
    pub fn new(inner: Arc<dyn Geocoder>, config: &CacheConfig) -> Self {
        let addresses = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, addresses }
    }

    /// Resolve coordinates, using the cache if available.
    pub async fn reverse_cached(&self, at: LatLng) -> Result<String, GeocodeError> {
        let key = at.rounded_e5();

        if let Some(cached) = self.addresses.get(&key).await {
            tracing::trace!(%at, "geocode cache hit");
            return Ok(cached);
        }

        let address = self.inner.reverse(at).await?;
        self.addresses.insert(key, address.clone()).await;

        Ok(address)
    }
}

impl Geocoder for CachedGeocoder {
    fn reverse(&self, at: LatLng) -> BoxFuture<'_, Result<String, GeocodeError>> {
        Box::pin(self.reverse_cached(at))
    }
}
