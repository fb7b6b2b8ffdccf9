//! Shared test doubles for controller tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use todo_sync::domain::{Item, ItemId, ItemPatch, NewItem, RemoteError, Timestamp};
use todo_sync::service::{CollectionService, InMemoryCollectionService};
use tokio::sync::oneshot;

/// One call received by a test service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListAll,
    Create(NewItem),
    Update(ItemId, ItemPatch),
    Delete(ItemId),
}

/// Wraps an in-memory store, recording every call.
///
/// Calls can be made to fail, and the answer to the next `create`/`update`
/// can be scripted.
#[derive(Debug, Default)]
pub struct RecordingService {
    pub inner: InMemoryCollectionService,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
    scripted: Mutex<VecDeque<Item>>,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            inner: InMemoryCollectionService::with_items(items),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Every following call fails with a 500 until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The next `create` or `update` returns `item` instead of the store's answer.
    pub fn respond_with(&self, item: Item) {
        self.scripted.lock().unwrap().push_back(item);
    }

    fn record(&self, call: Call) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(injected_failure())
        } else {
            Ok(())
        }
    }

    fn scripted(&self) -> Option<Item> {
        self.scripted.lock().unwrap().pop_front()
    }
}

pub fn injected_failure() -> RemoteError {
    RemoteError::Status {
        status: 500,
        body: "injected".to_string(),
    }
}

#[async_trait]
impl CollectionService for RecordingService {
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError> {
        self.record(Call::ListAll)?;
        self.inner.list_all().await
    }

    async fn create(&self, item: &NewItem) -> Result<Item, RemoteError> {
        self.record(Call::Create(item.clone()))?;
        match self.scripted() {
            Some(reply) => Ok(reply),
            None => self.inner.create(item).await,
        }
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RemoteError> {
        self.record(Call::Update(id, patch.clone()))?;
        match self.scripted() {
            Some(reply) => Ok(reply),
            None => self.inner.update(id, patch).await,
        }
    }

    async fn delete(&self, id: ItemId) -> Result<(), RemoteError> {
        self.record(Call::Delete(id))?;
        self.inner.delete(id).await
    }
}

/// A service whose `update` and `delete` calls each wait for a gate to open
/// and then return a preset answer.
#[derive(Debug, Default)]
pub struct GatedService {
    items: Mutex<Vec<Item>>,
    gates: Mutex<VecDeque<(oneshot::Receiver<()>, Result<Item, RemoteError>)>>,
    waiting: Mutex<usize>,
}

impl GatedService {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Queues the answer for the next gated call. Send on the returned
    /// sender to release it.
    pub fn gate(&self, answer: Result<Item, RemoteError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back((rx, answer));
        tx
    }

    /// Number of calls currently blocked on a gate.
    pub fn waiting(&self) -> usize {
        *self.waiting.lock().unwrap()
    }

    /// Yields until `n` calls are blocked on their gates.
    pub async fn wait_for(&self, n: usize) {
        while self.waiting() < n {
            tokio::task::yield_now().await;
        }
    }

    async fn pass(&self) -> Result<Item, RemoteError> {
        let gate = self.gates.lock().unwrap().pop_front();
        let Some((rx, answer)) = gate else {
            return Err(RemoteError::Transport("no gate queued".to_string()));
        };
        *self.waiting.lock().unwrap() += 1;
        let _ = rx.await;
        *self.waiting.lock().unwrap() -= 1;
        answer
    }
}

#[async_trait]
impl CollectionService for GatedService {
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, _item: &NewItem) -> Result<Item, RemoteError> {
        Err(RemoteError::Transport("create is not gated".to_string()))
    }

    async fn update(&self, _id: ItemId, _patch: &ItemPatch) -> Result<Item, RemoteError> {
        self.pass().await
    }

    async fn delete(&self, _id: ItemId) -> Result<(), RemoteError> {
        self.pass().await.map(|_| ())
    }
}

pub fn item(id: i64, title: &str, completed: bool) -> Item {
    Item::new(ItemId::new(id), title).with_completed(completed)
}

pub fn stamped(mut item: Item, created: &str) -> Item {
    item.created_at = Some(Timestamp::new(created));
    item
}
