//! Process-local collection store.
//!
//! Mirrors the semantics of the REST backend the HTTP adapter talks to:
//!
//! - ids are issued sequentially starting at 1 and never reused
//! - `createdAt` and `updatedAt` are stamped by the store on create, and
//!   `updatedAt` is refreshed on every update
//! - updates skip absent fields
//! - updating or deleting an unknown id fails with [`RemoteError::NotFound`]
//!
//! Used by the shell's offline mode and throughout the test suite.

use crate::domain::{Item, ItemId, ItemPatch, NewItem, RemoteError, Timestamp};
use crate::service::backend::CollectionService;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct StoreData {
    /// Items in insertion order.
    items: Vec<Item>,

    /// Last issued id.
    last_id: i64,
}

/// In-memory implementation of [`CollectionService`].
#[derive(Debug, Default)]
pub struct InMemoryCollectionService {
    data: Mutex<StoreData>,
}

impl InMemoryCollectionService {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `items`, as if they had been
    /// created earlier. Subsequent ids continue after the largest seeded id.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        let last_id = items.iter().map(|item| item.id.get()).max().unwrap_or(0);
        Self {
            data: Mutex::new(StoreData { items, last_id }),
        }
    }

    /// Returns a copy of the stored items.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Removes every item. Issued ids are still never reused.
    pub fn delete_all(&self) {
        let mut data = self.lock();
        tracing::debug!(count = data.items.len(), "deleting all items");
        data.items.clear();
    }

    fn lock(&self) -> MutexGuard<'_, StoreData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now() -> Timestamp {
        Timestamp::new(chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
    }
}

#[async_trait]
impl CollectionService for InMemoryCollectionService {
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError> {
        let items = self.snapshot();
        tracing::debug!(count = items.len(), "memory store listed items");
        Ok(items)
    }

    async fn create(&self, item: &NewItem) -> Result<Item, RemoteError> {
        let mut data = self.lock();
        data.last_id += 1;
        let now = Self::now();
        let created = Item {
            id: ItemId::new(data.last_id),
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };
        data.items.push(created.clone());

        tracing::debug!(item_id = %created.id, "memory store created item");
        Ok(created)
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RemoteError> {
        let mut data = self.lock();
        let item = data
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(RemoteError::NotFound(id))?;

        patch.apply_to(item);
        item.updated_at = Some(Self::now());

        tracing::debug!(item_id = %id, "memory store updated item");
        Ok(item.clone())
    }

    async fn delete(&self, id: ItemId) -> Result<(), RemoteError> {
        let mut data = self.lock();
        let position = data
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(RemoteError::NotFound(id))?;
        data.items.remove(position);

        tracing::debug!(item_id = %id, "memory store deleted item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(title: &str) -> NewItem {
        NewItem {
            title: title.to_string(),
            description: String::new(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn create_issues_sequential_ids_and_timestamps() {
        let store = InMemoryCollectionService::new();
        let first = store.create(&new_item("a")).await.unwrap();
        let second = store.create(&new_item("b")).await.unwrap();

        assert_eq!(first.id, ItemId::new(1));
        assert_eq!(second.id, ItemId::new(2));
        assert!(first.created_at.is_some());
        assert!(first.updated_at.is_some());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryCollectionService::new();
        let first = store.create(&new_item("a")).await.unwrap();
        store.delete(first.id).await.unwrap();
        store.delete_all();

        let next = store.create(&new_item("b")).await.unwrap();
        assert_eq!(next.id, ItemId::new(2));
    }

    #[tokio::test]
    async fn partial_update_leaves_absent_fields() {
        let store = InMemoryCollectionService::with_items(vec![
            Item::new(ItemId::new(4), "A").with_description("keep"),
        ]);

        let updated = store.update(ItemId::new(4), &ItemPatch::completion(true)).await.unwrap();
        assert_eq!(updated.title, "A");
        assert_eq!(updated.description, "keep");
        assert!(updated.completed);

        let next = store.create(&new_item("b")).await.unwrap();
        assert_eq!(next.id, ItemId::new(5));
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let store = InMemoryCollectionService::new();
        let id = ItemId::new(9);

        assert_eq!(
            store.update(id, &ItemPatch::completion(true)).await,
            Err(RemoteError::NotFound(id))
        );
        assert_eq!(store.delete(id).await, Err(RemoteError::NotFound(id)));
    }
}
