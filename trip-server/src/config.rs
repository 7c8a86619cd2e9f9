//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! | --- | --- |
//! | `GOOGLE_MAPS_API_KEY` | none; required unless `DIRECTIONS_MOCK_DIR` is set |
//! | `DIRECTIONS_MOCK_DIR` | none; serve canned replies from this directory |
//! | `DIRECTIONS_BASE_URL` | provider production URL |
//! | `DIRECTIONS_TIMEOUT_SECS` | 30 |
//! | `TRIP_SERVER_ADDR` | `127.0.0.1:3000` |
//! | `TRIP_SERVER_STATIC_DIR` | `static` |
//! | `TRIP_DEFAULT_UTC_OFFSET_MINUTES` | the server's local offset at startup |
//!
//! The default offset is fixed: it does not follow daylight-saving changes.
//! It only applies to clients that send no `utc_offset_minutes`; the page
//! always sends the offset in force at the date the user picked.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{FixedOffset, Local, Offset};

use crate::domain::offset_from_minutes;

/// Map centre when the page first loads (Long Beach, CA).
const DEFAULT_CENTER: (f64, f64) = (33.77, -118.19);

const DEFAULT_ZOOM: u8 = 14;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but can't be parsed
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Neither a real nor a mock provider is configured
    #[error("set GOOGLE_MAPS_API_KEY, or DIRECTIONS_MOCK_DIR to use canned replies")]
    NoProvider,
}

/// Where directions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// The live provider, authenticated with an API key.
    Live {
        api_key: String,
        base_url: Option<String>,
        timeout_secs: u64,
    },
    /// Canned replies loaded from a directory.
    Mock { data_dir: PathBuf },
}

/// Initial map view handed to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        let (center_lat, center_lng) = DEFAULT_CENTER;
        Self {
            center_lat,
            center_lng,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub provider: ProviderConfig,
    /// Offset for `datetime-local` values when the page doesn't send one.
    pub default_utc_offset: FixedOffset,
    pub map: MapDefaults,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = match get("TRIP_SERVER_ADDR") {
            Some(v) => v.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "TRIP_SERVER_ADDR",
                    value: v.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let static_dir = get("TRIP_SERVER_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        let timeout_secs = match get("DIRECTIONS_TIMEOUT_SECS") {
            Some(v) => v.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "DIRECTIONS_TIMEOUT_SECS",
                    value: v.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => 30,
        };

        let provider = match (get("DIRECTIONS_MOCK_DIR"), get("GOOGLE_MAPS_API_KEY")) {
            (Some(dir), _) => ProviderConfig::Mock {
                data_dir: PathBuf::from(dir),
            },
            (None, Some(api_key)) => ProviderConfig::Live {
                api_key,
                base_url: get("DIRECTIONS_BASE_URL"),
                timeout_secs,
            },
            (None, None) => return Err(ConfigError::NoProvider),
        };

        let default_utc_offset = match get("TRIP_DEFAULT_UTC_OFFSET_MINUTES") {
            Some(v) => {
                let invalid = |reason: String| ConfigError::Invalid {
                    var: "TRIP_DEFAULT_UTC_OFFSET_MINUTES",
                    value: v.clone(),
                    reason,
                };
                let minutes: i32 = v.trim().parse().map_err(|e| invalid(format!("{e}")))?;
                offset_from_minutes(minutes).map_err(|e| invalid(e.to_string()))?
            }
            None => Local::now().offset().fix(),
        };

        Ok(Self {
            addr,
            static_dir,
            provider,
            default_utc_offset,
            map: MapDefaults::default(),
        })
    }
}
