//! Append-only audit trail and candidate event log.
//!
//! Both sides share the same contract: records are created by the state
//! machine operation that produced them, inserted once, and queried read-only
//! thereafter. The event side additionally notifies a bus collaborator after
//! the durable write; that publish is best-effort by design of the callers.

mod entry;
mod event_log;
mod store;
mod trail;

pub use entry::{ActorId, AuditLogEntry, CandidateEvent, RequestContext};
pub use event_log::{EventLog, EventPublisher, EventSummary, PublishError};
pub use store::{
    AuditStore, AuditStoreError, CandidateEventStore, InMemoryAuditStore,
    InMemoryCandidateEventStore,
};
pub use trail::AuditTrail;
