//! Retryable background-operation queue.
//!
//! Pure exponential backoff feeds an in-memory claimable queue; the scheduler
//! object polls it on an interval and hands claimed operations to a handler.
//! Timed rules take a caller-supplied `now` so the whole module tests without
//! wall-clock dependence.

pub mod backoff;
pub mod scheduler;
pub mod store;

pub use backoff::{retry_delay, RetryConfig};
pub use scheduler::{HandlerError, OperationHandler, OperationScheduler};
pub use store::{
    Claim, OperationId, OperationKind, OperationQueue, OperationStatus, QueueConfig, QueueError,
    QueuedOperation, RetryOutcome,
};
