use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::types::{DeletableItem, DeleteSignal, TaskId};
use super::Result;

/// Backend capability for removing items and cancelling pending removals.
#[async_trait]
pub trait DeleteBackend: Send + Sync {
    /// Starts deleting the item, returning the pending task identifier.
    async fn remove(&self, collection_id: &str, item: &DeletableItem) -> Result<TaskId>;

    /// Cancels a pending removal.
    async fn cancel(&self, task_id: &TaskId) -> Result<()>;
}

/// Callbacks handed back by a cancelled grace period to report how the undo went.
pub trait GraceReply: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// How a grace period ended.
pub enum GraceOutcome {
    /// The window elapsed without user action.
    Elapsed,
    /// The user asked to undo.
    Cancelled(Box<dyn GraceReply>),
}

impl GraceOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GraceOutcome::Cancelled(_))
    }
}

impl std::fmt::Debug for GraceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraceOutcome::Elapsed => f.write_str("Elapsed"),
            GraceOutcome::Cancelled(_) => f.write_str("Cancelled"),
        }
    }
}

/// Presents the undo affordance for a pending task.
#[async_trait]
pub trait GracePeriod: Send + Sync {
    /// Resolves once the window elapses or the user acts.
    ///
    /// `timeout` of `None` uses the implementation's default window.
    async fn grace(
        &self,
        task_id: &TaskId,
        message: &str,
        action_label: &str,
        timeout: Option<Duration>,
    ) -> Result<GraceOutcome>;
}

/// User-facing notification sink.
pub trait Notifier: Send + Sync {
    fn info(&self, title: &str, text: &str);
    fn error(&self, title: &str, text: &str);
}

/// Fan-out of delete signals to any number of observers.
#[async_trait]
pub trait SignalBus: Send + Sync {
    /// Publishes a signal on its topic. Having no subscribers is not an error.
    async fn publish(&self, signal: DeleteSignal) -> Result<()>;

    /// Subscribes to every signal published on `topic`.
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<DeleteSignal>>;
}
