//! Service-desk ticket lifecycle: status state machine, SLA due-time engine,
//! and the service facade pairing every authorized mutation with an audit
//! entry.

pub mod domain;
pub mod repository;
pub mod service;
pub mod sla;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use domain::{
    RequesterContact, SlaPolicy, Ticket, TicketImpact, TicketNumber, TicketPriority, TicketStatus,
    TicketUrgency,
};
pub use repository::{TicketRepository, TicketRepositoryError};
pub use service::{TicketIntake, TicketService, TicketServiceError};
pub use sla::{compute_due, SlaDueTimes};
pub use transitions::{
    apply_transition, validate_transition, InvalidTransition, ReopenWindows,
};
