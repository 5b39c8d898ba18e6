//! In-memory delete backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use calgrace_core::deletion::{BackendError, DeletableItem, DeleteBackend, Result, TaskId};

/// A removed item that can still be restored.
#[derive(Debug, Clone)]
struct PendingTask {
    item: DeletableItem,
    removed_at: Instant,
}

/// In-memory delete backend.
///
/// `remove` moves an item out of its collection into a pending table keyed by
/// a fresh task id. `cancel` puts it back as long as the task is younger than
/// `task_ttl`; after that the removal counts as committed.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    items: Arc<RwLock<HashMap<(String, String), DeletableItem>>>,
    pending: Arc<RwLock<HashMap<TaskId, PendingTask>>>,
    task_ttl: Duration,
}

impl InMemoryBackend {
    /// Creates a new empty backend.
    pub fn new(task_ttl: Duration) -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            pending: Arc::new(RwLock::new(HashMap::new())),
            task_ttl,
        }
    }

    /// Stores an item in its collection.
    pub async fn insert(&self, item: DeletableItem) {
        let mut items = self.items.write().await;
        items.insert((item.collection_id.clone(), item.id.clone()), item);
    }

    /// Returns true if the item is currently visible in the collection.
    pub async fn contains(&self, collection_id: &str, id: &str) -> bool {
        let items = self.items.read().await;
        items.contains_key(&(collection_id.to_string(), id.to_string()))
    }

    /// Returns the number of removals that can still be cancelled.
    pub async fn pending_count(&self) -> usize {
        let pending = self.pending.read().await;
        pending
            .values()
            .filter(|task| task.removed_at.elapsed() <= self.task_ttl)
            .count()
    }
}

#[async_trait]
impl DeleteBackend for InMemoryBackend {
    async fn remove(&self, collection_id: &str, item: &DeletableItem) -> Result<TaskId> {
        let removed = {
            let mut items = self.items.write().await;
            items.remove(&(collection_id.to_string(), item.id.clone()))
        };

        let Some(removed) = removed else {
            return Err(BackendError::NotFound {
                entity_type: item.kind.as_str(),
                id: item.id.clone(),
            });
        };

        let task_id = TaskId::new(Uuid::new_v4().to_string());
        let mut pending = self.pending.write().await;
        // Expired tasks can no longer be cancelled, so their items are gone for good.
        pending.retain(|_, task| task.removed_at.elapsed() <= self.task_ttl);
        pending.insert(
            task_id.clone(),
            PendingTask {
                item: removed,
                removed_at: Instant::now(),
            },
        );

        tracing::debug!(%task_id, %collection_id, item_id = %item.id, "Item removed");
        Ok(task_id)
    }

    async fn cancel(&self, task_id: &TaskId) -> Result<()> {
        let task = {
            let mut pending = self.pending.write().await;
            pending.remove(task_id)
        };

        let Some(task) = task else {
            return Err(BackendError::TaskNotFound(task_id.to_string()));
        };

        if task.removed_at.elapsed() > self.task_ttl {
            tracing::debug!(%task_id, "Task expired before cancellation");
            return Err(BackendError::TaskExpired(task_id.to_string()));
        }

        let mut items = self.items.write().await;
        items.insert(
            (task.item.collection_id.clone(), task.item.id.clone()),
            task.item,
        );

        tracing::debug!(%task_id, "Removal cancelled, item restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item() -> DeletableItem {
        DeletableItem::contact("book-1", "c-1").with_display_name("Jane Doe")
    }

    #[tokio::test]
    async fn test_remove_and_cancel_restores_item() {
        let backend = InMemoryBackend::new(Duration::from_secs(60));
        let item = create_test_item();
        backend.insert(item.clone()).await;

        let task_id = backend.remove("book-1", &item).await.unwrap();
        assert!(!backend.contains("book-1", "c-1").await);
        assert_eq!(backend.pending_count().await, 1);

        backend.cancel(&task_id).await.unwrap();
        assert!(backend.contains("book-1", "c-1").await);
        assert_eq!(backend.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_missing_item() {
        let backend = InMemoryBackend::new(Duration::from_secs(60));
        let item = create_test_item();

        let result = backend.remove("book-1", &item).await;

        assert_eq!(
            result,
            Err(BackendError::NotFound {
                entity_type: "contact",
                id: "c-1".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_remove_uses_given_collection() {
        let backend = InMemoryBackend::new(Duration::from_secs(60));
        let item = create_test_item();
        backend.insert(item.clone()).await;

        let result = backend.remove("book-2", &item).await;

        assert!(matches!(result, Err(BackendError::NotFound { .. })));
        assert!(backend.contains("book-1", "c-1").await);
    }

    #[tokio::test]
    async fn test_cancel_unknown_task() {
        let backend = InMemoryBackend::new(Duration::from_secs(60));

        let result = backend.cancel(&TaskId::new("missing")).await;

        assert_eq!(result, Err(BackendError::TaskNotFound("missing".to_string())));
    }

    #[tokio::test]
    async fn test_cancel_twice_fails() {
        let backend = InMemoryBackend::new(Duration::from_secs(60));
        let item = create_test_item();
        backend.insert(item.clone()).await;

        let task_id = backend.remove("book-1", &item).await.unwrap();
        backend.cancel(&task_id).await.unwrap();

        assert!(matches!(
            backend.cancel(&task_id).await,
            Err(BackendError::TaskNotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_ttl_fails() {
        let backend = InMemoryBackend::new(Duration::from_secs(5));
        let item = create_test_item();
        backend.insert(item.clone()).await;

        let task_id = backend.remove("book-1", &item).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;

        let result = backend.cancel(&task_id).await;

        assert_eq!(result, Err(BackendError::TaskExpired(task_id.to_string())));
        assert!(!backend.contains("book-1", "c-1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_drops_expired_tasks() {
        let backend = InMemoryBackend::new(Duration::from_secs(5));
        for index in 0..100 {
            let item = DeletableItem::contact("book-1", format!("c-{index}"));
            backend.insert(item.clone()).await;
            backend.remove("book-1", &item).await.unwrap();
        }
        assert_eq!(backend.pending.read().await.len(), 100);

        tokio::time::advance(Duration::from_secs(600)).await;

        let item = DeletableItem::contact("book-1", "fresh");
        backend.insert(item.clone()).await;
        let task_id = backend.remove("book-1", &item).await.unwrap();

        let pending = backend.pending.read().await;
        assert_eq!(pending.len(), 1);
        assert!(pending.contains_key(&task_id));
    }
}
