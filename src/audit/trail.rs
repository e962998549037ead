use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::entry::{ActorId, AuditLogEntry, RequestContext};
use super::store::{AuditStore, AuditStoreError};

static AUDIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_entry_id() -> String {
    let id = AUDIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("audit-{id:06}")
}

/// Append-only trail of actor/action/entity records with before/after
/// snapshots. Entries are built here, inserted through the store seam, and
/// never touched again.
pub struct AuditTrail<S> {
    store: Arc<S>,
}

impl<S> AuditTrail<S>
where
    S: AuditStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record one audited action. `before`/`after` are opaque snapshots owned
    /// by the calling operation; `now` is caller-supplied to keep the trail
    /// testable without wall-clock dependence.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        actor: Option<ActorId>,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        before: Option<Value>,
        after: Option<Value>,
        context: RequestContext,
        now: DateTime<Utc>,
    ) -> Result<AuditLogEntry, AuditStoreError> {
        let entry = AuditLogEntry {
            id: next_entry_id(),
            actor,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            before,
            after,
            context,
            created_at: now,
        };
        self.store.append(entry)
    }

    /// Read-only view of the trail for one entity.
    pub fn entries_for(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditLogEntry>, AuditStoreError> {
        self.store.entries_for(entity_type, entity_id)
    }
}
