use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for service-desk tickets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketNumber(pub String);

/// Lifecycle status tracked for every ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    InProgress,
    OnHold,
    Resolved,
    Closed,
    Reopened,
}

impl TicketStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::OnHold => "on_hold",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
            TicketStatus::Reopened => "reopened",
        }
    }
}

/// Requester-facing severity of the reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub const fn label(self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }
}

/// Breadth of the disruption, used alongside urgency for triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketImpact {
    Individual,
    Team,
    Department,
    Organization,
}

/// How quickly the requester needs the issue addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketUrgency {
    Low,
    Medium,
    High,
}

/// Contact details captured at intake so follow-ups reach the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterContact {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

/// A named pair of response-time budgets attached to a ticket at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub name: String,
    pub first_response_minutes: i64,
    pub resolution_minutes: i64,
    pub active: bool,
}

/// Service-desk ticket with its lifecycle and SLA timestamps.
///
/// `resolved_at` and `closed_at` are stamped exactly once per entry into that
/// state and cleared again when the ticket is reopened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: TicketNumber,
    pub subject: String,
    pub requester: RequesterContact,
    pub priority: TicketPriority,
    pub impact: TicketImpact,
    pub urgency: TicketUrgency,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub reopened_at: Option<DateTime<Utc>>,
    pub first_response_due: DateTime<Utc>,
    pub resolution_due: DateTime<Utc>,
    pub sla_policy: String,
}
