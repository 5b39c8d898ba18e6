use serde::{Deserialize, Serialize};

use super::error::DeleteError;

/// Lifecycle of a single delete request.
///
/// ```text
/// Idle -> Requested -> Failed
///                   -> PendingGrace -> Committed
///                                   -> CancelRequested -> CancelSucceeded
///                                                      -> CancelFailed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
    #[default]
    Idle,
    Requested,
    Failed,
    PendingGrace,
    Committed,
    CancelRequested,
    CancelSucceeded,
    CancelFailed,
}

/// Inputs that move a delete request between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateEvent {
    /// The request was issued (or rejected before reaching the backend).
    Submitted,
    RemoveFailed,
    RemoveAccepted,
    /// The grace window ran out without user action.
    GraceElapsed,
    /// The grace collaborator failed; the deletion stays in effect.
    GraceFailed,
    UserCancelled,
    CancelSucceeded,
    CancelFailed,
}

impl DeleteState {
    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeleteState::Failed
                | DeleteState::Committed
                | DeleteState::CancelSucceeded
                | DeleteState::CancelFailed
        )
    }

    /// Applies an event, returning the next state.
    pub fn advance(self, event: StateEvent) -> Result<DeleteState, DeleteError> {
        use DeleteState as S;
        use StateEvent as E;

        let next = match (self, event) {
            (S::Idle, E::Submitted) => S::Requested,
            (S::Requested, E::RemoveFailed) => S::Failed,
            (S::Requested, E::RemoveAccepted) => S::PendingGrace,
            (S::PendingGrace, E::GraceElapsed | E::GraceFailed) => S::Committed,
            (S::PendingGrace, E::UserCancelled) => S::CancelRequested,
            (S::CancelRequested, E::CancelSucceeded) => S::CancelSucceeded,
            (S::CancelRequested, E::CancelFailed) => S::CancelFailed,
            (from, event) => return Err(DeleteError::InvalidTransition { from, event }),
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[StateEvent]) -> Result<DeleteState, DeleteError> {
        events
            .iter()
            .try_fold(DeleteState::Idle, |state, event| state.advance(*event))
    }

    #[test]
    fn test_remove_failure_is_terminal() {
        let state = run(&[StateEvent::Submitted, StateEvent::RemoveFailed]).unwrap();
        assert_eq!(state, DeleteState::Failed);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_grace_elapsed_commits() {
        let state = run(&[
            StateEvent::Submitted,
            StateEvent::RemoveAccepted,
            StateEvent::GraceElapsed,
        ])
        .unwrap();
        assert_eq!(state, DeleteState::Committed);
    }

    #[test]
    fn test_cancel_paths() {
        let prefix = [
            StateEvent::Submitted,
            StateEvent::RemoveAccepted,
            StateEvent::UserCancelled,
        ];

        let mut ok = prefix.to_vec();
        ok.push(StateEvent::CancelSucceeded);
        assert_eq!(run(&ok).unwrap(), DeleteState::CancelSucceeded);

        let mut failed = prefix.to_vec();
        failed.push(StateEvent::CancelFailed);
        assert_eq!(run(&failed).unwrap(), DeleteState::CancelFailed);
    }

    #[test]
    fn test_pending_is_not_terminal() {
        assert!(!DeleteState::PendingGrace.is_terminal());
        assert!(!DeleteState::CancelRequested.is_terminal());
    }

    #[test]
    fn test_terminal_states_reject_events() {
        let result = DeleteState::Committed.advance(StateEvent::UserCancelled);
        assert_eq!(
            result,
            Err(DeleteError::InvalidTransition {
                from: DeleteState::Committed,
                event: StateEvent::UserCancelled,
            })
        );
    }

    #[test]
    fn test_cannot_cancel_before_acceptance() {
        let result = run(&[StateEvent::Submitted, StateEvent::UserCancelled]);
        assert!(matches!(
            result,
            Err(DeleteError::InvalidTransition {
                from: DeleteState::Requested,
                ..
            })
        ));
    }
}
