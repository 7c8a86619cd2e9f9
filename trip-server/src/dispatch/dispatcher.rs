//! Trip request dispatch.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::AbortHandle;

use crate::directions::{
    DirectionsProvider, DirectionsRequest, DirectionsResponse, DirectionsStatus, build_request,
};
use crate::domain::TripRequest;

use super::session::{DispatchState, SessionRegistry};

/// Result of dispatching one trip.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The provider found a route.
    Routed {
        request: DirectionsRequest,
        response: DirectionsResponse,
    },

    /// The lookup failed; `status` carries the message to show.
    Failed {
        request: DirectionsRequest,
        status: DirectionsStatus,
    },

    /// A newer submission from the same session replaced this one.
    Superseded,
}

/// Sends trips to a directions provider, one request per submission.
pub struct TripDispatcher {
    provider: Arc<dyn DirectionsProvider>,
    sessions: SessionRegistry,
}

impl TripDispatcher {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        Self {
            provider,
            sessions: SessionRegistry::new(),
        }
    }

    /// Build and send the directions request for `trip`.
    ///
    /// With a `session`, the request is registered so that a later
    /// submission from the same session aborts it; the aborted call returns
    /// [`DispatchOutcome::Superseded`]. Without one the request is simply run.
    pub async fn dispatch(&self, session: Option<&str>, trip: &TripRequest) -> DispatchOutcome {
        let request = build_request(trip, Utc::now());

        tracing::info!(
            origin = %request.origin,
            destination = %request.destination,
            mode = ?trip.timing.mode(),
            preference = ?trip.preference,
            "dispatching trip"
        );

        let provider = self.provider.clone();
        let outbound = request.clone();
        let handle = tokio::spawn(async move { provider.route(&outbound).await });

        // Dropped when this call completes or is itself dropped (client went
        // away); either way the session goes back to idle.
        let _guard = session.map(|s| InFlightGuard::new(&self.sessions, s, handle.abort_handle()));

        match handle.await {
            Ok(Ok(response)) => {
                tracing::info!(routes = response.routes.len(), "route found");
                DispatchOutcome::Routed { request, response }
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "directions lookup failed");
                DispatchOutcome::Failed {
                    request,
                    status: e.status(),
                }
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(session, "request superseded");
                DispatchOutcome::Superseded
            }
            Err(e) => {
                tracing::error!(error = %e, "directions task panicked");
                DispatchOutcome::Failed {
                    request,
                    status: DirectionsStatus::UnknownError,
                }
            }
        }
    }

    /// Whether `session` is waiting on a reply.
    pub fn state(&self, session: &str) -> DispatchState {
        self.sessions.state(session)
    }

    /// Number of sessions with a request in flight.
    pub fn in_flight(&self) -> usize {
        self.sessions.in_flight()
    }
}

/// Registers a request for a session and unregisters it on drop.
struct InFlightGuard<'a> {
    sessions: &'a SessionRegistry,
    session: &'a str,
    ticket: u64,
    abort: AbortHandle,
}

impl<'a> InFlightGuard<'a> {
    fn new(sessions: &'a SessionRegistry, session: &'a str, abort: AbortHandle) -> Self {
        let ticket = sessions.begin(session, abort.clone());
        Self {
            sessions,
            session,
            ticket,
            abort,
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        // Nobody will read the reply any more
        self.abort.abort();
        self.sessions.finish(self.session, self.ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use chrono::FixedOffset;

    use crate::directions::{MockDirectionsClient, TransitMode, TravelMode};

    const ROUTE: &str = r#"{"status": "OK", "routes": [{"summary": "1", "legs": []}]}"#;

    fn reply(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).unwrap()
    }

    fn mock() -> MockDirectionsClient {
        let mut replies = HashMap::new();
        replies.insert("default".to_string(), reply(ROUTE));
        replies.insert(
            "nowhere".to_string(),
            reply(r#"{"status": "ZERO_RESULTS", "routes": []}"#),
        );
        replies.insert(
            "limit".to_string(),
            reply(r#"{"status": "OVER_QUERY_LIMIT"}"#),
        );
        MockDirectionsClient::from_replies(replies)
    }

    fn trip(end: &str) -> TripRequest {
        TripRequest::from_form(
            "100 Main St, USA",
            end,
            "any",
            None,
            None,
            FixedOffset::east_opt(0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn routed_outcome_carries_request() {
        let dispatcher = TripDispatcher::new(Arc::new(mock()));
        match dispatcher.dispatch(None, &trip("200 Ocean Blvd")).await {
            DispatchOutcome::Routed { request, response } => {
                assert_eq!(request.origin, "100 Main St");
                assert_eq!(request.travel_mode, TravelMode::Transit);
                assert_eq!(request.transit_options.modes, vec![TransitMode::Bus]);
                assert_eq!(response.routes.len(), 1);
            }
            other => panic!("expected Routed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exactly_one_request_per_dispatch() {
        let client = mock().with_recording();
        let dispatcher = TripDispatcher::new(Arc::new(client.clone()));
        dispatcher.dispatch(Some("s"), &trip("200 Ocean Blvd")).await;
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn failure_status_is_reported() {
        let dispatcher = TripDispatcher::new(Arc::new(mock()));

        match dispatcher.dispatch(None, &trip("Nowhere")).await {
            DispatchOutcome::Failed { status, .. } => {
                assert_eq!(status, DirectionsStatus::ZeroResults)
            }
            other => panic!("expected Failed, got {other:?}"),
        }

        match dispatcher.dispatch(None, &trip("Limit")).await {
            DispatchOutcome::Failed { status, .. } => {
                assert_eq!(status, DirectionsStatus::OverQueryLimit)
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn session_returns_to_idle() {
        let dispatcher = TripDispatcher::new(Arc::new(mock()));
        dispatcher.dispatch(Some("s"), &trip("200 Ocean Blvd")).await;
        assert_eq!(dispatcher.state("s"), DispatchState::Idle);

        dispatcher.dispatch(Some("s"), &trip("Nowhere")).await;
        assert_eq!(dispatcher.state("s"), DispatchState::Idle);
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[tokio::test]
    async fn newer_submission_supersedes_older() {
        let client = mock().with_delay(Duration::from_millis(300));
        let dispatcher = Arc::new(TripDispatcher::new(Arc::new(client)));

        let first = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch(Some("s"), &trip("First St")).await })
        };

        while dispatcher.state("s") != DispatchState::AwaitingResponse {
            tokio::task::yield_now().await;
        }

        let second = dispatcher.dispatch(Some("s"), &trip("Second St")).await;
        let first = first.await.unwrap();

        assert!(matches!(first, DispatchOutcome::Superseded));
        match second {
            DispatchOutcome::Routed { request, .. } => assert_eq!(request.destination, "Second St"),
            other => panic!("expected Routed, got {other:?}"),
        }
        assert_eq!(dispatcher.state("s"), DispatchState::Idle);
    }

    #[tokio::test]
    async fn other_sessions_are_not_superseded() {
        let client = mock().with_delay(Duration::from_millis(50));
        let dispatcher = TripDispatcher::new(Arc::new(client));

        let trip_a = trip("A St");
        let trip_b = trip("B St");
        let (a, b) = tokio::join!(
            dispatcher.dispatch(Some("a"), &trip_a),
            dispatcher.dispatch(Some("b"), &trip_b),
        );

        assert!(matches!(a, DispatchOutcome::Routed { .. }));
        assert!(matches!(b, DispatchOutcome::Routed { .. }));
    }

    #[tokio::test]
    async fn dropped_call_goes_idle() {
        let client = mock().with_delay(Duration::from_secs(30));
        let dispatcher = Arc::new(TripDispatcher::new(Arc::new(client)));

        let call = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch(Some("s"), &trip("Slow St")).await })
        };
        while dispatcher.state("s") != DispatchState::AwaitingResponse {
            tokio::task::yield_now().await;
        }

        call.abort();
        let _ = call.await;
        assert_eq!(dispatcher.state("s"), DispatchState::Idle);
    }
}
