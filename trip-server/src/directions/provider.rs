//! The seam between the dispatcher and whatever answers directions requests.

use futures::future::BoxFuture;

use super::error::DirectionsError;
use super::request::DirectionsRequest;
use super::status::DirectionsStatus;
use super::types::DirectionsResponse;

/// Something that can answer a directions request.
///
/// Implemented by the live HTTP client and by the file-backed mock. A
/// successful result always has status `OK` and at least one route; every
/// other outcome is an error.
pub trait DirectionsProvider: Send + Sync {
    fn route<'a>(
        &'a self,
        request: &'a DirectionsRequest,
    ) -> BoxFuture<'a, Result<DirectionsResponse, DirectionsError>>;
}

/// Split a provider reply into success and status failure.
pub(super) fn classify(response: DirectionsResponse) -> Result<DirectionsResponse, DirectionsError> {
    if !response.status.is_ok() {
        return Err(DirectionsError::Status {
            status: response.status,
            message: response.error_message,
        });
    }

    // OK with nothing to show is reported the way the provider reports it
    // when it knows up front.
    if response.routes.is_empty() {
        return Err(DirectionsError::Status {
            status: DirectionsStatus::ZeroResults,
            message: None,
        });
    }

    Ok(response)
}
