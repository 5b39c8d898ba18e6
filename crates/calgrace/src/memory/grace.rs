//! In-memory grace period.
//!
//! Each running grace period owns a oneshot channel; the user undoes a
//! delete by firing it through `request_cancel` before the window elapses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, oneshot, Mutex};

use calgrace_core::deletion::{GraceOutcome, GracePeriod, GraceReply, Notifier, Result, TaskId};

/// Channel capacity for grace start announcements.
const STARTED_CAPACITY: usize = 16;

const GRACE_TITLE: &str = "Grace period";

/// Reports the result of an undo through the notification sink.
struct NotifierReply {
    notifier: Arc<dyn Notifier>,
}

impl GraceReply for NotifierReply {
    fn success(&self, message: &str) {
        self.notifier.info(GRACE_TITLE, message);
    }

    fn error(&self, message: &str) {
        self.notifier.error(GRACE_TITLE, message);
    }
}

/// In-memory grace period with a configurable default window.
#[derive(Clone)]
pub struct MemoryGracePeriod {
    default_timeout: Duration,
    notifier: Arc<dyn Notifier>,
    waiters: Arc<Mutex<HashMap<TaskId, oneshot::Sender<()>>>>,
    started_tx: broadcast::Sender<TaskId>,
}

impl MemoryGracePeriod {
    pub fn new(default_timeout: Duration, notifier: Arc<dyn Notifier>) -> Self {
        let (started_tx, _) = broadcast::channel(STARTED_CAPACITY);
        Self {
            default_timeout,
            notifier,
            waiters: Arc::new(Mutex::new(HashMap::new())),
            started_tx,
        }
    }

    /// Subscribe to the task ids of grace periods as they start.
    pub fn subscribe_started(&self) -> broadcast::Receiver<TaskId> {
        self.started_tx.subscribe()
    }

    /// The user's undo action. Returns false if no grace period is running
    /// for the task.
    pub async fn request_cancel(&self, task_id: &TaskId) -> bool {
        let sender = {
            let mut waiters = self.waiters.lock().await;
            waiters.remove(task_id)
        };

        match sender {
            Some(sender) => sender.send(()).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl GracePeriod for MemoryGracePeriod {
    async fn grace(
        &self,
        task_id: &TaskId,
        message: &str,
        action_label: &str,
        timeout: Option<Duration>,
    ) -> Result<GraceOutcome> {
        let timeout = timeout.unwrap_or(self.default_timeout);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        {
            let mut waiters = self.waiters.lock().await;
            waiters.insert(task_id.clone(), cancel_tx);
        }

        self.notifier
            .info(GRACE_TITLE, &format!("{message} [{action_label}]"));
        let _ = self.started_tx.send(task_id.clone());
        tracing::debug!(%task_id, timeout_ms = timeout.as_millis() as u64, "Grace period started");

        let cancelled = tokio::select! {
            _ = tokio::time::sleep(timeout) => false,
            result = cancel_rx => result.is_ok(),
        };

        {
            let mut waiters = self.waiters.lock().await;
            waiters.remove(task_id);
        }

        if cancelled {
            tracing::debug!(%task_id, "Grace period cancelled by user");
            Ok(GraceOutcome::Cancelled(Box::new(NotifierReply {
                notifier: self.notifier.clone(),
            })))
        } else {
            tracing::debug!(%task_id, "Grace period elapsed");
            Ok(GraceOutcome::Elapsed)
        }
    }
}
