//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::directions::DirectionsStatus;
use crate::dispatch::DispatchOutcome;
use crate::domain::{LatLng, TripError, TripRequest, offset_from_minutes};
use crate::geocode::GeocodeError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/trip/plan", post(plan_trip))
        .route("/trip/state", get(trip_state))
        .route("/api/geocode/reverse", get(reverse_geocode))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Planning page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = IndexTemplate::new(state.map)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;
    Ok(Html(html))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a trip: validate the form, send one directions request and render
/// the best route.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, body = %String::from_utf8_lossy(&body), "unparseable trip form");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let offset = req
        .utc_offset_minutes
        .map(offset_from_minutes)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?
        .unwrap_or(state.default_utc_offset);

    let trip = TripRequest::from_form(
        &req.start,
        &req.end,
        &req.when,
        req.datetime.as_deref(),
        req.preference.as_deref(),
        offset,
    )?;

    let session = req.session.as_deref().filter(|s| !s.is_empty());

    match state.dispatcher.dispatch(session, &trip).await {
        DispatchOutcome::Routed { request, response } => {
            // The dispatcher only reports success with at least one route
            let route = response.routes.first().ok_or_else(|| AppError::Unprocessable {
                status: DirectionsStatus::ZeroResults,
            })?;
            let itinerary = ItineraryResult::from_route(route);

            if accepts_html(&headers) {
                let html = ItineraryTemplate::new(itinerary)
                    .render()
                    .map_err(|e| AppError::Internal {
                        message: format!("Template error: {e}"),
                    })?;
                Ok(Html(html).into_response())
            } else {
                Ok(Json(PlanTripResponse { request, itinerary }).into_response())
            }
        }
        DispatchOutcome::Failed { status, .. } if accepts_html(&headers) => {
            tracing::info!(%status, "trip failed");
            let html = TripErrorTemplate {
                message: status.user_message().to_string(),
                status: Some(status.to_string()),
            }
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {e}"),
            })?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        DispatchOutcome::Failed { status, .. } => Err(AppError::Unprocessable { status }),
        DispatchOutcome::Superseded => Err(AppError::Conflict {
            message: "Superseded by a newer request".to_string(),
        }),
    }
}

/// Whether a session is waiting on a directions reply.
async fn trip_state(
    State(state): State<AppState>,
    Query(query): Query<SessionStateQuery>,
) -> Json<SessionStateResponse> {
    let dispatch_state = state.dispatcher.state(&query.session);
    Json(SessionStateResponse {
        session: query.session,
        state: dispatch_state,
    })
}

/// Resolve the browser's position to a start address.
async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseGeocodeQuery>,
) -> Result<Json<ReverseGeocodeResponse>, AppError> {
    let lat = coordinate("lat", query.lat.as_deref())?;
    let lng = coordinate("lng", query.lng.as_deref())?;
    let at = LatLng::new(lat, lng).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let geocoder = state.geocoder.as_ref().ok_or_else(|| AppError::Unavailable {
        message: "Location lookup is not available on this server".to_string(),
    })?;

    let address = geocoder.reverse(at).await?;
    Ok(Json(ReverseGeocodeResponse { address }))
}

/// Parse one required numeric query parameter.
fn coordinate(name: &str, value: Option<&str>) -> Result<f64, AppError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        AppError::BadRequest {
            message: format!("Missing {name}"),
        }
    })?;
    value.parse().map_err(|_| AppError::BadRequest {
        message: format!("Invalid {name}: {value:?}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The request was replaced by a newer one from the same session
    Conflict { message: String },
    /// The directions provider answered with a failure status
    Unprocessable { status: DirectionsStatus },
    /// A provider call failed in transport or returned garbage
    Upstream { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NoResult => AppError::NotFound {
                message: e.to_string(),
            },
            GeocodeError::NotConfigured(message) => AppError::Unavailable { message },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, provider_status) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message, None),
            AppError::Unprocessable { status } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                status.user_message().to_string(),
                Some(status.to_string()),
            ),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message, None),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message, None),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        if status.is_server_error() {
            tracing::error!(%status, %error, "request failed");
        } else {
            tracing::info!(%status, %error, "request rejected");
        }

        let body = Json(ErrorResponse {
            error,
            status: provider_status,
        });
        (status, body).into_response()
    }
}
