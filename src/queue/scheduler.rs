use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::store::{OperationQueue, QueuedOperation, RetryOutcome};

/// Handler invoked for each claimed operation. Implementations perform the
/// actual side effect (mail, sweep, follow-up) and report the result.
pub trait OperationHandler: Send + Sync {
    fn handle(&self, operation: &QueuedOperation) -> Result<(), HandlerError>;
}

/// Failure reported by an operation handler; the queue decides on retry.
#[derive(Debug, thiserror::Error)]
#[error("operation handler failed: {0}")]
pub struct HandlerError(pub String);

/// Background poller driving the operation queue. Constructed explicitly once
/// at process start and stopped through [`OperationScheduler::shutdown`];
/// there is no ambient global runner.
pub struct OperationScheduler {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl OperationScheduler {
    /// Spawn the polling loop. Each tick drains every currently-eligible
    /// operation, invoking the handler and feeding results back into the
    /// queue's retry bookkeeping.
    pub fn start<H>(
        queue: Arc<OperationQueue>,
        handler: Arc<H>,
        poll_interval: std::time::Duration,
        worker: &str,
    ) -> Self
    where
        H: OperationHandler + 'static,
    {
        let (stop, mut stopped) = watch::channel(false);
        let worker = worker.to_string();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(poll_interval) => {
                        drain_ready(&queue, handler.as_ref(), &worker);
                    }
                }
            }
            debug!(worker = %worker, "operation scheduler stopped");
        });

        Self { stop, task }
    }

    /// Signal the loop to stop and wait for the in-progress tick to finish.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        if let Err(err) = self.task.await {
            warn!(error = %err, "operation scheduler task did not shut down cleanly");
        }
    }
}

fn drain_ready<H>(queue: &OperationQueue, handler: &H, worker: &str)
where
    H: OperationHandler,
{
    loop {
        let claimed = match queue.dequeue_ready(Utc::now(), worker) {
            Ok(Some(operation)) => operation,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "operation dequeue failed");
                break;
            }
        };

        match handler.handle(&claimed) {
            Ok(()) => {
                if let Err(err) = queue.mark_succeeded(&claimed.id) {
                    warn!(operation = %claimed.id.0, error = %err, "mark_succeeded failed");
                }
            }
            Err(handler_err) => {
                warn!(
                    operation = %claimed.id.0,
                    kind = claimed.kind.label(),
                    error = %handler_err,
                    "operation attempt failed"
                );
                match queue.mark_failed(&claimed.id, Utc::now()) {
                    Ok(RetryOutcome::PermanentlyFailed { attempts }) => {
                        warn!(
                            operation = %claimed.id.0,
                            attempts,
                            "operation permanently failed"
                        );
                    }
                    Ok(RetryOutcome::Rescheduled { .. }) => {}
                    Err(err) => {
                        warn!(operation = %claimed.id.0, error = %err, "mark_failed failed");
                    }
                }
            }
        }
    }
}
