use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::backoff::{retry_delay, RetryConfig};

/// Identifier wrapper for queued operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub String);

static OPERATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_operation_id() -> OperationId {
    let id = OPERATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OperationId(format!("op-{id:06}"))
}

/// Side-effecting work the queue schedules on behalf of the workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    ReminderEmail,
    FollowUp,
    SlaSweep,
}

impl OperationKind {
    pub const fn label(self) -> &'static str {
        match self {
            OperationKind::ReminderEmail => "reminder_email",
            OperationKind::FollowUp => "follow_up",
            OperationKind::SlaSweep => "sla_sweep",
        }
    }
}

/// Queue status of an operation. `Succeeded` and `Failed` are terminal;
/// `Failed` is only reached through the caller-imposed attempt ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

/// Exclusive worker claim with a visibility timeout. A crashed worker's claim
/// expires and the item returns to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub worker: String,
    pub expires_at: DateTime<Utc>,
}

/// One schedulable unit of asynchronous work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedOperation {
    pub id: OperationId,
    pub kind: OperationKind,
    pub payload: Value,
    pub attempts: u32,
    pub next_run_at: DateTime<Utc>,
    pub status: OperationStatus,
    pub claim: Option<Claim>,
}

/// Retry curve, claim visibility, and the optional permanent-failure ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub retry: RetryConfig,
    pub visibility_timeout: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            visibility_timeout: Duration::minutes(5),
            max_attempts: None,
        }
    }
}

/// What `mark_failed` decided for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    Rescheduled {
        attempts: u32,
        next_run_at: DateTime<Utc>,
    },
    PermanentlyFailed {
        attempts: u32,
    },
}

/// Error enumeration for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("operation not found")]
    NotFound,
    #[error("operation queue unavailable: {0}")]
    Unavailable(String),
}

/// In-memory operation queue. All claim bookkeeping happens under a single
/// mutex acquisition, which gives `dequeue_ready` compare-and-swap semantics
/// under concurrent pollers: an eligible item is claimed by at most one
/// worker at a time.
#[derive(Debug, Default)]
pub struct OperationQueue {
    config: QueueConfig,
    items: Mutex<HashMap<OperationId, QueuedOperation>>,
}

impl OperationQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            items: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<OperationId, QueuedOperation>>, QueueError> {
        self.items
            .lock()
            .map_err(|_| QueueError::Unavailable("queue mutex poisoned".to_string()))
    }

    /// Enqueue new work, eligible to run immediately.
    pub fn enqueue(
        &self,
        kind: OperationKind,
        payload: Value,
        now: DateTime<Utc>,
    ) -> Result<OperationId, QueueError> {
        let operation = QueuedOperation {
            id: next_operation_id(),
            kind,
            payload,
            attempts: 0,
            next_run_at: now,
            status: OperationStatus::Pending,
            claim: None,
        };
        let id = operation.id.clone();
        self.lock()?.insert(id.clone(), operation);
        Ok(id)
    }

    /// Claim the next eligible operation for `worker`, or `None` when nothing
    /// is due. Expired claims on in-flight items are released back to pending
    /// before selection, so a crashed worker's work is eventually re-offered.
    pub fn dequeue_ready(
        &self,
        now: DateTime<Utc>,
        worker: &str,
    ) -> Result<Option<QueuedOperation>, QueueError> {
        let mut items = self.lock()?;

        for item in items.values_mut() {
            if item.status == OperationStatus::InFlight {
                let expired = item
                    .claim
                    .as_ref()
                    .map(|claim| claim.expires_at <= now)
                    .unwrap_or(true);
                if expired {
                    item.status = OperationStatus::Pending;
                    item.claim = None;
                }
            }
        }

        let chosen = items
            .values()
            .filter(|item| item.status == OperationStatus::Pending && item.next_run_at <= now)
            .min_by(|a, b| {
                a.next_run_at
                    .cmp(&b.next_run_at)
                    .then_with(|| a.id.0.cmp(&b.id.0))
            })
            .map(|item| item.id.clone());

        let Some(id) = chosen else {
            return Ok(None);
        };
        let item = items.get_mut(&id).ok_or(QueueError::NotFound)?;
        item.status = OperationStatus::InFlight;
        item.claim = Some(Claim {
            worker: worker.to_string(),
            expires_at: now + self.config.visibility_timeout,
        });
        Ok(Some(item.clone()))
    }

    /// Archive the operation as succeeded. Archived records stay readable
    /// through [`OperationQueue::get`] until [`OperationQueue::prune_archived`]
    /// drops them.
    pub fn mark_succeeded(&self, id: &OperationId) -> Result<(), QueueError> {
        let mut items = self.lock()?;
        let item = items.get_mut(id).ok_or(QueueError::NotFound)?;
        item.status = OperationStatus::Succeeded;
        item.claim = None;
        Ok(())
    }

    /// Record a failed attempt: bump the counter, release the claim, and
    /// either reschedule with backoff or, past the configured ceiling, park
    /// the operation as permanently failed. Never silently dropped.
    pub fn mark_failed(
        &self,
        id: &OperationId,
        now: DateTime<Utc>,
    ) -> Result<RetryOutcome, QueueError> {
        let mut items = self.lock()?;
        let item = items.get_mut(id).ok_or(QueueError::NotFound)?;

        item.attempts = item.attempts.saturating_add(1);
        item.claim = None;

        if let Some(ceiling) = self.config.max_attempts {
            if item.attempts >= ceiling {
                item.status = OperationStatus::Failed;
                return Ok(RetryOutcome::PermanentlyFailed {
                    attempts: item.attempts,
                });
            }
        }

        let attempt = item.attempts.min(i32::MAX as u32) as i32;
        let next_run_at = now + retry_delay(&self.config.retry, attempt);
        item.status = OperationStatus::Pending;
        item.next_run_at = next_run_at;
        Ok(RetryOutcome::Rescheduled {
            attempts: item.attempts,
            next_run_at,
        })
    }

    /// Drop archived operations (succeeded or permanently failed), returning
    /// how many were removed. Long-lived processes call this periodically so
    /// the archive does not grow without bound.
    pub fn prune_archived(&self) -> Result<usize, QueueError> {
        let mut items = self.lock()?;
        let before = items.len();
        items.retain(|_, item| {
            !matches!(
                item.status,
                OperationStatus::Succeeded | OperationStatus::Failed
            )
        });
        Ok(before - items.len())
    }

    /// Current snapshot of one operation.
    pub fn get(&self, id: &OperationId) -> Result<Option<QueuedOperation>, QueueError> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Pending-or-in-flight count, used by shutdown drains and tests.
    pub fn active_len(&self) -> Result<usize, QueueError> {
        Ok(self
            .lock()?
            .values()
            .filter(|item| {
                matches!(
                    item.status,
                    OperationStatus::Pending | OperationStatus::InFlight
                )
            })
            .count())
    }
}
