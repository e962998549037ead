use std::sync::Mutex;

use super::entry::{AuditLogEntry, CandidateEvent};

/// Append-only persistence seam for audit entries. The trait deliberately has
/// no update or delete surface; entries are immutable once inserted.
pub trait AuditStore: Send + Sync {
    fn append(&self, entry: AuditLogEntry) -> Result<AuditLogEntry, AuditStoreError>;
    fn entries_for(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditLogEntry>, AuditStoreError>;
}

/// Append-only persistence seam for candidate events.
pub trait CandidateEventStore: Send + Sync {
    fn append(&self, event: CandidateEvent) -> Result<CandidateEvent, AuditStoreError>;
    fn events_for(&self, candidate_id: &str) -> Result<Vec<CandidateEvent>, AuditStoreError>;
}

/// Error enumeration for audit persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum AuditStoreError {
    #[error("audit store unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-backed store used by tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl AuditStore for InMemoryAuditStore {
    fn append(&self, entry: AuditLogEntry) -> Result<AuditLogEntry, AuditStoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| AuditStoreError::Unavailable("audit mutex poisoned".to_string()))?;
        guard.push(entry.clone());
        Ok(entry)
    }

    fn entries_for(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditLogEntry>, AuditStoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| AuditStoreError::Unavailable("audit mutex poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|entry| entry.entity_type == entity_type && entry.entity_id == entity_id)
            .cloned()
            .collect())
    }
}

/// Mutex-backed candidate event store for tests and single-process use.
#[derive(Debug, Default)]
pub struct InMemoryCandidateEventStore {
    events: Mutex<Vec<CandidateEvent>>,
}

impl CandidateEventStore for InMemoryCandidateEventStore {
    fn append(&self, event: CandidateEvent) -> Result<CandidateEvent, AuditStoreError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AuditStoreError::Unavailable("event mutex poisoned".to_string()))?;
        guard.push(event.clone());
        Ok(event)
    }

    fn events_for(&self, candidate_id: &str) -> Result<Vec<CandidateEvent>, AuditStoreError> {
        let guard = self
            .events
            .lock()
            .map_err(|_| AuditStoreError::Unavailable("event mutex poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|event| event.candidate_id == candidate_id)
            .cloned()
            .collect())
    }
}
