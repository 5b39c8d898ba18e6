use std::sync::Arc;

use serde::Serialize;

use calgrace_core::deletion::{
    cancel_failed_message, grace_failed_message, grace_message, notification_title,
    remove_failed_message, restored_message, DeletableItem, DeleteBackend, DeleteError,
    DeleteSignal, DeleteState, GraceOutcome, GracePeriod, GraceReply, Notifier, PendingDeletion,
    SignalBus, StateEvent, GRACE_ACTION_LABEL,
};

/// How a delete request ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "pending", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The grace window elapsed; the deletion stands.
    Committed(PendingDeletion),
    /// The user undid the deletion and the backend restored the item.
    Restored(PendingDeletion),
}

impl DeleteOutcome {
    pub fn pending(&self) -> &PendingDeletion {
        match self {
            DeleteOutcome::Committed(pending) | DeleteOutcome::Restored(pending) => pending,
        }
    }

    /// Returns the terminal state this outcome corresponds to.
    pub fn state(&self) -> DeleteState {
        match self {
            DeleteOutcome::Committed(_) => DeleteState::Committed,
            DeleteOutcome::Restored(_) => DeleteState::CancelSucceeded,
        }
    }
}

/// Coordinates a reversible delete: remove, offer a grace period, and cancel
/// the pending task if the user asks for it.
///
/// Holds no per-request state, so any number of requests may run at once.
#[derive(Clone)]
pub struct GracefulDelete {
    backend: Arc<dyn DeleteBackend>,
    grace: Arc<dyn GracePeriod>,
    notifier: Arc<dyn Notifier>,
    signals: Arc<dyn SignalBus>,
}

impl GracefulDelete {
    pub fn new(
        backend: Arc<dyn DeleteBackend>,
        grace: Arc<dyn GracePeriod>,
        notifier: Arc<dyn Notifier>,
        signals: Arc<dyn SignalBus>,
    ) -> Self {
        Self {
            backend,
            grace,
            notifier,
            signals,
        }
    }

    /// Deletes `item` from `collection_id`, giving the user a chance to undo.
    ///
    /// Every failure is reported through the notifier before being returned.
    /// Nothing is retried.
    pub async fn request_delete(
        &self,
        collection_id: &str,
        item: &DeletableItem,
    ) -> Result<DeleteOutcome, DeleteError> {
        let title = notification_title(item.kind);
        let state = DeleteState::Idle.advance(StateEvent::Submitted)?;

        if collection_id.trim().is_empty() {
            let state = state.advance(StateEvent::RemoveFailed)?;
            tracing::warn!(item_id = %item.id, ?state, "Delete requested without collection");
            self.notifier.error(&title, &remove_failed_message(item.kind));
            return Err(DeleteError::EmptyCollectionId);
        }

        let task_id = match self.backend.remove(collection_id, item).await {
            Ok(task_id) => task_id,
            Err(err) => {
                let state = state.advance(StateEvent::RemoveFailed)?;
                tracing::warn!(%collection_id, item_id = %item.id, ?state, error = %err, "Remove failed");
                self.notifier.error(&title, &remove_failed_message(item.kind));
                return Err(DeleteError::RemoveFailed(err));
            }
        };

        let state = state.advance(StateEvent::RemoveAccepted)?;
        let pending = PendingDeletion::new(task_id.clone(), item.clone());
        tracing::info!(%task_id, %collection_id, item_id = %item.id, ?state, "Delete pending");

        let outcome = match self
            .grace
            .grace(&task_id, &grace_message(item), GRACE_ACTION_LABEL, None)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                let state = state.advance(StateEvent::GraceFailed)?;
                tracing::error!(%task_id, ?state, error = %err, "Grace period failed");
                self.notifier.error(&title, &grace_failed_message(item.kind));
                return Err(DeleteError::GraceFailed {
                    task_id: task_id.to_string(),
                    source: err,
                });
            }
        };

        let reply = match outcome {
            GraceOutcome::Elapsed => {
                let state = state.advance(StateEvent::GraceElapsed)?;
                tracing::info!(%task_id, ?state, "Delete committed");
                return Ok(DeleteOutcome::Committed(pending));
            }
            GraceOutcome::Cancelled(reply) => reply,
        };

        let state = state.advance(StateEvent::UserCancelled)?;
        tracing::debug!(%task_id, ?state, "Cancelling pending delete");

        match self.backend.cancel(&task_id).await {
            Ok(()) => {
                let state = state.advance(StateEvent::CancelSucceeded)?;
                let signal = DeleteSignal::cancel_delete(item.clone());
                if let Err(err) = self.signals.publish(signal).await {
                    tracing::warn!(%task_id, error = %err, "Failed to publish cancel signal");
                }
                reply.success(&restored_message(item));
                tracing::info!(%task_id, ?state, "Delete cancelled");
                Ok(DeleteOutcome::Restored(pending))
            }
            Err(err) => {
                let state = state.advance(StateEvent::CancelFailed)?;
                tracing::warn!(%task_id, ?state, error = %err, "Cancel failed, deletion stands");
                reply.error(&cancel_failed_message(item.kind));
                Err(DeleteError::CancelFailed {
                    task_id: task_id.to_string(),
                    source: err,
                })
            }
        }
    }
}
