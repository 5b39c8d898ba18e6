use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of item being deleted.
///
/// Determines the signal namespace and the generic label used in messages
/// when the item has no display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Contact,
    Event,
}

impl ItemKind {
    /// Returns the lowercase name used in signal topics and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Contact => "contact",
            ItemKind::Event => "event",
        }
    }

    /// Returns the indefinite article for the kind's name.
    pub fn article(&self) -> &'static str {
        match self {
            ItemKind::Contact => "a",
            ItemKind::Event => "an",
        }
    }

    /// Returns the topic broadcast when a deletion of this kind is undone.
    pub fn cancel_delete_topic(&self) -> String {
        format!("{}:cancel:delete", self.as_str())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item the user asked to delete. Read-only input to the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletableItem {
    pub id: String,
    pub display_name: Option<String>,
    /// The owning book or calendar.
    pub collection_id: String,
    pub kind: ItemKind,
}

impl DeletableItem {
    /// Creates a new contact without a display name.
    pub fn contact(collection_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            collection_id: collection_id.into(),
            kind: ItemKind::Contact,
        }
    }

    /// Creates a new calendar event without a display name.
    pub fn event(collection_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            collection_id: collection_id.into(),
            kind: ItemKind::Event,
        }
    }

    /// Sets the display name for this item.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Returns the display name, treating blank names as absent.
    pub fn name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Opaque token the backend returns when it accepts a delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A delete the backend acknowledged and that is waiting on its grace period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeletion {
    pub task_id: TaskId,
    pub item: DeletableItem,
    pub created_at: DateTime<Utc>,
}

impl PendingDeletion {
    pub fn new(task_id: TaskId, item: DeletableItem) -> Self {
        Self {
            task_id,
            item,
            created_at: Utc::now(),
        }
    }
}

/// Broadcast after a pending delete was successfully cancelled, so observers
/// can restore the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSignal {
    pub topic: String,
    pub item: DeletableItem,
}

impl DeleteSignal {
    /// Creates the `<kind>:cancel:delete` signal for the given item.
    pub fn cancel_delete(item: DeletableItem) -> Self {
        Self {
            topic: item.kind.cancel_delete_topic(),
            item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_delete_topic() {
        assert_eq!(
            ItemKind::Contact.cancel_delete_topic(),
            "contact:cancel:delete"
        );
        assert_eq!(ItemKind::Event.cancel_delete_topic(), "event:cancel:delete");
    }

    #[test]
    fn test_item_builder() {
        let item = DeletableItem::contact("book-1", "c-1").with_display_name("Jane Doe");

        assert_eq!(item.collection_id, "book-1");
        assert_eq!(item.id, "c-1");
        assert_eq!(item.kind, ItemKind::Contact);
        assert_eq!(item.name(), Some("Jane Doe"));
    }

    #[test]
    fn test_blank_name_is_absent() {
        let item = DeletableItem::event("cal-1", "e-1").with_display_name("   ");
        assert_eq!(item.name(), None);
    }

    #[test]
    fn test_signal_carries_item() {
        let item = DeletableItem::contact("book-1", "c-1");
        let signal = DeleteSignal::cancel_delete(item.clone());

        assert_eq!(signal.topic, "contact:cancel:delete");
        assert_eq!(signal.item, item);
    }

    #[test]
    fn test_task_id_serializes_transparently() {
        let task_id = TaskId::new("task-42");
        let json = serde_json::to_string(&task_id).unwrap();
        assert_eq!(json, "\"task-42\"");
    }
}
