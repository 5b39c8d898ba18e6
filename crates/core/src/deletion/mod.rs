mod error;
mod messages;
mod state;
mod traits;
mod types;

pub use error::{BackendError, DeleteError, Result};
pub use messages::{
    cancel_failed_message, grace_failed_message, grace_message, notification_title,
    remove_failed_message, restored_message, GRACE_ACTION_LABEL,
};
pub use state::{DeleteState, StateEvent};
pub use traits::{DeleteBackend, GraceOutcome, GracePeriod, GraceReply, Notifier, SignalBus};
pub use types::{DeletableItem, DeleteSignal, ItemKind, PendingDeletion, TaskId};
