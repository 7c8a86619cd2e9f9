//! Per-session request tracking.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::task::AbortHandle;

/// Whether a session has a directions request outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    Idle,
    AwaitingResponse,
}

/// The request a session is currently waiting on.
struct InFlight {
    ticket: u64,
    abort: AbortHandle,
}

/// Tracks the in-flight request of every session.
///
/// The lock is only held for map updates, never across an `.await`.
#[derive(Default)]
pub struct SessionRegistry {
    inflight: Mutex<HashMap<String, InFlight>>,
    next_ticket: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request for `session`, aborting any earlier one.
    ///
    /// Returns a ticket identifying this request for [`finish`](Self::finish).
    pub fn begin(&self, session: &str, abort: AbortHandle) -> u64 {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let previous = match self.inflight.lock() {
            Ok(mut map) => map.insert(session.to_string(), InFlight { ticket, abort }),
            Err(poisoned) => poisoned
                .into_inner()
                .insert(session.to_string(), InFlight { ticket, abort }),
        };

        if let Some(previous) = previous {
            tracing::debug!(session, superseded = previous.ticket, "aborting earlier request");
            previous.abort.abort();
        }

        ticket
    }

    /// Mark request `ticket` of `session` as finished.
    ///
    /// A no-op if a newer request has replaced it in the meantime.
    pub fn finish(&self, session: &str, ticket: u64) {
        let mut map = match self.inflight.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        if map.get(session).is_some_and(|f| f.ticket == ticket) {
            map.remove(session);
        }
    }

    /// Current state of `session`. Unknown sessions are idle.
    pub fn state(&self, session: &str) -> DispatchState {
        let map = match self.inflight.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        if map.contains_key(session) {
            DispatchState::AwaitingResponse
        } else {
            DispatchState::Idle
        }
    }

    /// Number of sessions with a request in flight.
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pending_task() -> tokio::task::JoinHandle<()> {
        tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        })
    }

    #[tokio::test]
    async fn begin_and_finish() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.state("a"), DispatchState::Idle);

        let task = pending_task();
        let ticket = registry.begin("a", task.abort_handle());
        assert_eq!(registry.state("a"), DispatchState::AwaitingResponse);
        assert_eq!(registry.state("b"), DispatchState::Idle);

        registry.finish("a", ticket);
        assert_eq!(registry.state("a"), DispatchState::Idle);
        task.abort();
    }

    #[tokio::test]
    async fn second_begin_aborts_first() {
        let registry = SessionRegistry::new();

        let first = pending_task();
        let first_ticket = registry.begin("a", first.abort_handle());

        let second = pending_task();
        let second_ticket = registry.begin("a", second.abort_handle());

        let err = first.await.unwrap_err();
        assert!(err.is_cancelled());

        // Stale finish leaves the newer request registered
        registry.finish("a", first_ticket);
        assert_eq!(registry.state("a"), DispatchState::AwaitingResponse);

        registry.finish("a", second_ticket);
        assert_eq!(registry.state("a"), DispatchState::Idle);
        second.abort();
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let registry = SessionRegistry::new();
        let a = pending_task();
        let b = pending_task();
        registry.begin("a", a.abort_handle());
        registry.begin("b", b.abort_handle());
        assert_eq!(registry.in_flight(), 2);

        a.abort();
        b.abort();
    }

    #[test]
    fn state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DispatchState::AwaitingResponse).unwrap(),
            "\"awaiting_response\""
        );
    }
}
