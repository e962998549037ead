use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of the authenticated account that performed an action. `None`
/// marks system-initiated work such as queue sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

/// Request metadata carried alongside every audited action so entries can be
/// traced back to their originating call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Immutable record of a state-changing action with opaque before/after
/// snapshots. Snapshots are never interpreted here; round-trip fidelity is the
/// only contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub actor: Option<ActorId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub context: RequestContext,
    pub created_at: DateTime<Utc>,
}

/// Structured record of a candidate pipeline change, paired 1:1 with the stage
/// transition that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvent {
    pub id: String,
    pub candidate_id: String,
    pub action: String,
    pub from_status: Option<String>,
    pub to_status: String,
    pub performed_by: Option<ActorId>,
    pub meta: Value,
    pub created_at: DateTime<Utc>,
}
