use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::audit::InMemoryAuditStore;
use crate::authz::ServiceDeskRole;
use crate::workflows::ticketing::domain::{
    RequesterContact, SlaPolicy, Ticket, TicketImpact, TicketNumber, TicketPriority, TicketStatus,
    TicketUrgency,
};
use crate::workflows::ticketing::repository::{TicketRepository, TicketRepositoryError};
use crate::workflows::ticketing::service::{TicketIntake, TicketService};
use crate::workflows::ticketing::transitions::ReopenWindows;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).single().expect("valid timestamp")
}

pub(super) fn requester() -> RequesterContact {
    RequesterContact {
        name: "Dana Whitfield".to_string(),
        email: "dana.whitfield@example.com".to_string(),
        department: Some("Finance".to_string()),
    }
}

pub(super) fn standard_policy() -> SlaPolicy {
    SlaPolicy {
        name: "standard".to_string(),
        first_response_minutes: 60,
        resolution_minutes: 240,
        active: true,
    }
}

pub(super) fn intake() -> TicketIntake {
    TicketIntake {
        subject: "VPN drops every hour".to_string(),
        requester: requester(),
        priority: TicketPriority::High,
        impact: TicketImpact::Team,
        urgency: TicketUrgency::High,
        policy: standard_policy(),
    }
}

pub(super) fn ticket_in(status: TicketStatus, created_at: DateTime<Utc>) -> Ticket {
    Ticket {
        number: TicketNumber("TKT-900001".to_string()),
        subject: "Printer offline".to_string(),
        requester: requester(),
        priority: TicketPriority::Medium,
        impact: TicketImpact::Individual,
        urgency: TicketUrgency::Medium,
        status,
        created_at,
        resolved_at: None,
        closed_at: None,
        reopened_at: None,
        first_response_due: created_at + chrono::Duration::minutes(60),
        resolution_due: created_at + chrono::Duration::minutes(240),
        sla_policy: "standard".to_string(),
    }
}

pub(super) fn technician_roles() -> HashSet<ServiceDeskRole> {
    HashSet::from([ServiceDeskRole::Technician])
}

pub(super) fn requester_roles() -> HashSet<ServiceDeskRole> {
    HashSet::from([ServiceDeskRole::Requester])
}

#[derive(Default)]
pub(super) struct MemoryTicketRepository {
    pub(super) records: Mutex<HashMap<TicketNumber, Ticket>>,
}

impl TicketRepository for MemoryTicketRepository {
    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketRepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&ticket.number) {
            return Err(TicketRepositoryError::Conflict);
        }
        guard.insert(ticket.number.clone(), ticket.clone());
        Ok(ticket)
    }

    fn update(&self, ticket: Ticket) -> Result<(), TicketRepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(ticket.number.clone(), ticket);
        Ok(())
    }

    fn fetch(&self, number: &TicketNumber) -> Result<Option<Ticket>, TicketRepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(number).cloned())
    }
}

pub(super) fn build_service() -> (
    TicketService<MemoryTicketRepository, InMemoryAuditStore>,
    Arc<MemoryTicketRepository>,
    Arc<InMemoryAuditStore>,
) {
    let repository = Arc::new(MemoryTicketRepository::default());
    let audit = Arc::new(InMemoryAuditStore::default());
    let service = TicketService::new(repository.clone(), audit.clone(), ReopenWindows::default());
    (service, repository, audit)
}
