//! User-facing texts for the delete-with-undo workflow.

use super::types::{DeletableItem, ItemKind};

/// Label of the action offered during the grace period.
pub const GRACE_ACTION_LABEL: &str = "Cancel";

/// Title used for notifications about a delete of the given kind.
pub fn notification_title(kind: ItemKind) -> String {
    match kind {
        ItemKind::Contact => "Contact Delete".to_string(),
        ItemKind::Event => "Event Delete".to_string(),
    }
}

/// Message shown while the grace period runs.
///
/// Names the item when it has a display name, otherwise falls back to its kind.
pub fn grace_message(item: &DeletableItem) -> String {
    match item.name() {
        Some(name) => format!(
            "You have just deleted {} {} ({}).",
            item.kind.article(),
            item.kind,
            name
        ),
        None => format!("You have just deleted {} {}.", item.kind.article(), item.kind),
    }
}

pub fn remove_failed_message(kind: ItemKind) -> String {
    format!("The {kind} cannot be deleted, please retry later")
}

pub fn restored_message(item: &DeletableItem) -> String {
    match item.name() {
        Some(name) => format!("{name} has been restored"),
        None => format!("The {} has been restored", item.kind),
    }
}

pub fn cancel_failed_message(kind: ItemKind) -> String {
    format!("Cannot cancel {kind} deletion, the {kind} might be deleted permanently")
}

pub fn grace_failed_message(kind: ItemKind) -> String {
    format!("The {kind} has been deleted and the deletion cannot be undone")
}
