//! Collection service abstraction.
//!
//! This module defines the [`CollectionService`] trait, the only collaborator
//! the list controller talks to. It models a REST-like collection endpoint
//! with exactly the four operations the controller needs; it is not a
//! generic repository.

use crate::domain::{Item, ItemId, ItemPatch, NewItem, RemoteError};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote, authoritative store of items.
///
/// Every call is a suspension point. Implementations report any non-success
/// outcome as a [`RemoteError`]; they never panic on remote failures.
///
/// # Implementations
///
/// - [`HttpCollectionService`](crate::service::HttpCollectionService): JSON over HTTP
/// - [`InMemoryCollectionService`](crate::service::InMemoryCollectionService):
///   process-local store with the same semantics
///
/// # Examples
///
/// ```
/// use todo_sync::service::{CollectionService, InMemoryCollectionService};
/// use todo_sync::domain::NewItem;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), todo_sync::domain::RemoteError> {
/// let service = InMemoryCollectionService::new();
/// let created = service
///     .create(&NewItem { title: "A".into(), description: String::new(), completed: false })
///     .await?;
/// assert_eq!(service.list_all().await?, vec![created]);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CollectionService: Send + Sync {
    /// Fetches the full collection in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError>;

    /// Persists a provisional record and returns it with its server id and
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the record or the request fails.
    async fn create(&self, item: &NewItem) -> Result<Item, RemoteError>;

    /// Applies a partial update. Fields absent from `patch` are left
    /// unchanged. Returns the full updated record.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] or a status error if `id` is
    /// unknown to the store, or any other failure of the request.
    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RemoteError>;

    /// Deletes the item.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is unknown to the store or the request fails.
    async fn delete(&self, id: ItemId) -> Result<(), RemoteError>;
}

#[async_trait]
impl<S: CollectionService + ?Sized> CollectionService for Arc<S> {
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError> {
        (**self).list_all().await
    }

    async fn create(&self, item: &NewItem) -> Result<Item, RemoteError> {
        (**self).create(item).await
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RemoteError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ItemId) -> Result<(), RemoteError> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<S: CollectionService + ?Sized> CollectionService for Box<S> {
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError> {
        (**self).list_all().await
    }

    async fn create(&self, item: &NewItem) -> Result<Item, RemoteError> {
        (**self).create(item).await
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RemoteError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ItemId) -> Result<(), RemoteError> {
        (**self).delete(id).await
    }
}
