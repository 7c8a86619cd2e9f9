use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedGeocoder};
use trip_server::config::{ProviderConfig, ServerConfig};
use trip_server::directions::{
    DirectionsClient, DirectionsConfig, DirectionsProvider, MockDirectionsClient,
};
use trip_server::dispatch::TripDispatcher;
use trip_server::geocode::{GeocodeClient, GeocodeConfig, Geocoder};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Pick the directions provider; the geocoder only exists with a live key
    let (provider, geocoder): (Arc<dyn DirectionsProvider>, Option<Arc<dyn Geocoder>>) =
        match &config.provider {
            ProviderConfig::Live {
                api_key,
                base_url,
                timeout_secs,
            } => {
                let mut directions_config =
                    DirectionsConfig::new(api_key).with_timeout(*timeout_secs);
                if let Some(url) = base_url {
                    directions_config = directions_config.with_base_url(url);
                }

                let geocode_client = GeocodeClient::new(GeocodeConfig::from(&directions_config))?;
                let geocoder: Arc<dyn Geocoder> = Arc::new(CachedGeocoder::new(
                    Arc::new(geocode_client),
                    &CacheConfig::default(),
                ));

                tracing::info!(base_url = %directions_config.base_url, "using live directions provider");
                let provider: Arc<dyn DirectionsProvider> =
                    Arc::new(DirectionsClient::new(directions_config)?);
                (provider, Some(geocoder))
            }
            ProviderConfig::Mock { data_dir } => {
                tracing::warn!(dir = %data_dir.display(), "serving canned directions replies");
                let provider: Arc<dyn DirectionsProvider> =
                    Arc::new(MockDirectionsClient::new(data_dir)?);
                (provider, None)
            }
        };

    let mut state = AppState::new(TripDispatcher::new(provider), config.default_utc_offset)
        .with_map(config.map);
    if let Some(geocoder) = geocoder {
        state = state.with_geocoder(geocoder);
    }

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Trip planner listening on http://{}", config.addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  POST /trip/plan            - Plan a trip");
    tracing::info!("  GET  /trip/state           - Session dispatch state");
    tracing::info!("  GET  /api/geocode/reverse  - Address for coordinates");

    axum::serve(listener, app).await?;
    Ok(())
}
