use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::entry::{ActorId, CandidateEvent};
use super::store::{AuditStoreError, CandidateEventStore};

static EVENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_event_id() -> String {
    let id = EVENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("evt-{id:06}")
}

/// Condensed event shape handed to the notification bus after the durable
/// write commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: String,
    pub candidate_id: String,
    pub action: String,
    pub to_status: String,
}

/// Outbound notification seam (event bus, webhooks). Delivery semantics are
/// the collaborator's concern.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, summary: EventSummary) -> Result<(), PublishError>;
}

/// Event-bus dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Append-only candidate event log. The durable write happens inside the
/// caller's transaction; publishing to the bus is best-effort and can never
/// fail or roll back the state transition that produced the event.
pub struct EventLog<S, P> {
    store: Arc<S>,
    publisher: Arc<P>,
}

impl<S, P> EventLog<S, P>
where
    S: CandidateEventStore,
    P: EventPublisher,
{
    pub fn new(store: Arc<S>, publisher: Arc<P>) -> Self {
        Self { store, publisher }
    }

    /// Insert one candidate event, then notify the bus. A publish failure is
    /// logged and swallowed; only the insert can fail this call.
    #[allow(clippy::too_many_arguments)]
    pub fn record_event(
        &self,
        candidate_id: &str,
        action: &str,
        from_status: Option<&str>,
        to_status: &str,
        performed_by: Option<ActorId>,
        meta: Value,
        now: DateTime<Utc>,
    ) -> Result<CandidateEvent, AuditStoreError> {
        let event = CandidateEvent {
            id: next_event_id(),
            candidate_id: candidate_id.to_string(),
            action: action.to_string(),
            from_status: from_status.map(str::to_string),
            to_status: to_status.to_string(),
            performed_by,
            meta,
            created_at: now,
        };
        let stored = self.store.append(event)?;

        let summary = EventSummary {
            event_id: stored.id.clone(),
            candidate_id: stored.candidate_id.clone(),
            action: stored.action.clone(),
            to_status: stored.to_status.clone(),
        };
        if let Err(err) = self.publisher.publish(summary) {
            warn!(event_id = %stored.id, error = %err, "candidate event publish failed");
        }

        Ok(stored)
    }

    /// Read-only history for one candidate, oldest first.
    pub fn events_for(&self, candidate_id: &str) -> Result<Vec<CandidateEvent>, AuditStoreError> {
        self.store.events_for(candidate_id)
    }
}
