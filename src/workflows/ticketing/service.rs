use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{SlaPolicy, Ticket, TicketNumber, TicketStatus};
use super::repository::{TicketRepository, TicketRepositoryError};
use super::sla;
use super::transitions::{self, InvalidTransition, ReopenWindows};
use crate::audit::{ActorId, AuditStore, AuditStoreError, AuditTrail, RequestContext};
use crate::authz::{satisfies, ServiceDeskRole};

/// Fields collected at intake before a ticket number is assigned.
#[derive(Debug, Clone)]
pub struct TicketIntake {
    pub subject: String,
    pub requester: super::domain::RequesterContact,
    pub priority: super::domain::TicketPriority,
    pub impact: super::domain::TicketImpact,
    pub urgency: super::domain::TicketUrgency,
    pub policy: SlaPolicy,
}

static TICKET_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_ticket_number() -> TicketNumber {
    let id = TICKET_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TicketNumber(format!("TKT-{id:06}"))
}

const ENTITY_TYPE: &str = "ticket";

fn transition_roles() -> HashSet<ServiceDeskRole> {
    HashSet::from([ServiceDeskRole::Technician, ServiceDeskRole::Manager])
}

fn intake_roles() -> HashSet<ServiceDeskRole> {
    HashSet::from([
        ServiceDeskRole::Requester,
        ServiceDeskRole::Technician,
        ServiceDeskRole::Manager,
    ])
}

/// Service composing the role check, state machine, SLA engine, repository,
/// and audit trail. Every mutation it authorizes is paired with an audit
/// entry inside the caller's transaction boundary.
pub struct TicketService<R, S> {
    tickets: Arc<R>,
    audit: AuditTrail<S>,
    windows: ReopenWindows,
}

impl<R, S> TicketService<R, S>
where
    R: TicketRepository + 'static,
    S: AuditStore + 'static,
{
    pub fn new(tickets: Arc<R>, audit_store: Arc<S>, windows: ReopenWindows) -> Self {
        Self {
            tickets,
            audit: AuditTrail::new(audit_store),
            windows,
        }
    }

    /// Open a new ticket: assign a number, compute SLA due times from the
    /// intake policy, persist, and audit the creation with no `before`
    /// snapshot.
    pub fn open_ticket(
        &self,
        intake: TicketIntake,
        actor: ActorId,
        held_roles: &HashSet<ServiceDeskRole>,
        now: DateTime<Utc>,
        context: RequestContext,
    ) -> Result<Ticket, TicketServiceError> {
        if !satisfies(held_roles, &intake_roles()) {
            return Err(TicketServiceError::Unauthorized {
                action: "ticket.open",
            });
        }

        let due = sla::compute_due(now, &intake.policy);
        let ticket = Ticket {
            number: next_ticket_number(),
            subject: intake.subject,
            requester: intake.requester,
            priority: intake.priority,
            impact: intake.impact,
            urgency: intake.urgency,
            status: TicketStatus::Open,
            created_at: now,
            resolved_at: None,
            closed_at: None,
            reopened_at: None,
            first_response_due: due.first_response_due,
            resolution_due: due.resolution_due,
            sla_policy: intake.policy.name,
        };

        let stored = self.tickets.insert(ticket)?;
        let after = serde_json::to_value(&stored)?;
        self.audit.record(
            Some(actor),
            "ticket.open",
            ENTITY_TYPE,
            &stored.number.0,
            None,
            Some(after),
            context,
            now,
        )?;
        info!(ticket = %stored.number.0, policy = %stored.sla_policy, "ticket opened");
        Ok(stored)
    }

    /// Authorize and apply one status transition: role check, adjacency and
    /// reopen-window validation, timestamp application, durable update, and
    /// the before/after audit record.
    pub fn transition(
        &self,
        number: &TicketNumber,
        target: TicketStatus,
        actor: ActorId,
        held_roles: &HashSet<ServiceDeskRole>,
        now: DateTime<Utc>,
        context: RequestContext,
    ) -> Result<Ticket, TicketServiceError> {
        if !satisfies(held_roles, &transition_roles()) {
            return Err(TicketServiceError::Unauthorized {
                action: "ticket.transition",
            });
        }

        let mut ticket = self
            .tickets
            .fetch(number)?
            .ok_or(TicketRepositoryError::NotFound)?;

        transitions::validate_transition(&ticket, target, now, &self.windows)?;

        let before = serde_json::to_value(&ticket)?;
        transitions::apply_transition(&mut ticket, target, now);
        let after = serde_json::to_value(&ticket)?;

        self.tickets.update(ticket.clone())?;
        self.audit.record(
            Some(actor),
            "ticket.transition",
            ENTITY_TYPE,
            &ticket.number.0,
            Some(before),
            Some(after),
            context,
            now,
        )?;
        info!(
            ticket = %ticket.number.0,
            status = ticket.status.label(),
            "ticket transitioned"
        );
        Ok(ticket)
    }

    /// Audit history for one ticket, read-only.
    pub fn history(
        &self,
        number: &TicketNumber,
    ) -> Result<Vec<crate::audit::AuditLogEntry>, TicketServiceError> {
        Ok(self.audit.entries_for(ENTITY_TYPE, &number.0)?)
    }
}

/// Error raised by the ticket service.
#[derive(Debug, thiserror::Error)]
pub enum TicketServiceError {
    #[error("actor is not permitted to perform {action}")]
    Unauthorized { action: &'static str },
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    Repository(#[from] TicketRepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditStoreError),
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
