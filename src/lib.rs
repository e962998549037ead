//! Workflow core shared by the ticketing and recruitment administration
//! platforms.
//!
//! The crate owns the non-trivial decision logic: status state machines with
//! SLA and reopen-window timing, the append-only audit/event trail, role
//! satisfaction, screening decisions, and the retrying operation queue.
//! I/O is left to collaborators: persistence supplies entities and applies the
//! mutations this core authorizes, an identity provider supplies actors and
//! roles, and an event bus receives best-effort notifications.

pub mod audit;
pub mod authz;
pub mod config;
pub mod error;
pub mod queue;
pub mod telemetry;
pub mod workflows;

pub use audit::{ActorId, AuditLogEntry, AuditTrail, CandidateEvent, EventLog, RequestContext};
pub use config::AppConfig;
pub use error::StartupError;
pub use queue::{retry_delay, OperationQueue, OperationScheduler, RetryConfig};
pub use workflows::recruitment::{CandidateService, ScreeningVerdict, StageStatus};
pub use workflows::ticketing::{SlaPolicy, Ticket, TicketService, TicketStatus};

/// Load configuration and install telemetry in one step, the way an
/// embedding binary boots the crate.
pub fn bootstrap() -> Result<AppConfig, StartupError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}
