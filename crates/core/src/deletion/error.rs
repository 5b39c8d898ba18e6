use thiserror::Error;

use super::state::{DeleteState, StateEvent};

/// Errors reported by backend collaborators (remove, grace, cancel, publish).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("Task already committed: {0}")]
    TaskExpired(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Publish failed: {0}")]
    PublishFailed(String),
}

/// Errors that end a delete request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteError {
    #[error("Collection ID is required")]
    EmptyCollectionId,
    #[error("Remove failed: {0}")]
    RemoveFailed(BackendError),
    #[error("Grace period failed for task {task_id}: {source}")]
    GraceFailed {
        task_id: String,
        source: BackendError,
    },
    #[error("Cancel failed for task {task_id}: {source}")]
    CancelFailed {
        task_id: String,
        source: BackendError,
    },
    #[error("Invalid transition from {from:?} on {event:?}")]
    InvalidTransition { from: DeleteState, event: StateEvent },
}

/// Result type for backend collaborator calls.
pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let error = BackendError::NotFound {
            entity_type: "Contact",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Contact not found: abc-123");
        assert_eq!(
            BackendError::TaskExpired("t-1".to_string()).to_string(),
            "Task already committed: t-1"
        );
    }

    #[test]
    fn test_delete_error_display() {
        assert_eq!(
            DeleteError::EmptyCollectionId.to_string(),
            "Collection ID is required"
        );

        let error = DeleteError::CancelFailed {
            task_id: "t-1".to_string(),
            source: BackendError::Unavailable("timeout".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Cancel failed for task t-1: Backend unavailable: timeout"
        );
    }
}
