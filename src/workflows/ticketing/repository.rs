use super::domain::{Ticket, TicketNumber};

/// Storage abstraction so the ticket service can be exercised in isolation.
/// Implementations own the transaction boundary; the service hands them
/// fully-applied tickets.
pub trait TicketRepository: Send + Sync {
    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketRepositoryError>;
    fn update(&self, ticket: Ticket) -> Result<(), TicketRepositoryError>;
    fn fetch(&self, number: &TicketNumber) -> Result<Option<Ticket>, TicketRepositoryError>;
}

/// Error enumeration for ticket persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum TicketRepositoryError {
    #[error("ticket already exists")]
    Conflict,
    #[error("ticket not found")]
    NotFound,
    #[error("ticket store unavailable: {0}")]
    Unavailable(String),
}
