//! The list controller: intents in, collection service calls out.
//!
//! [`ListController`] owns a [`ListState`] and one [`CollectionService`].
//! Each mutating operation has the same three steps:
//!
//! 1. Read what the request needs from state (and validate it).
//! 2. Await the service call. No lock is held here.
//! 3. Apply the response to state by id, or leave state untouched and
//!    return the error.
//!
//! Updates are confirmed, never optimistic: local state only changes once
//! the store has answered, and always to what the store returned.
//!
//! # Ordering
//!
//! Operations take `&self`, so several may be in flight at once. Responses
//! are applied in the order they resolve, not the order they were issued;
//! the last response to resolve wins. A response whose UI context has
//! changed meanwhile (e.g. the edit was cancelled) still applies, unless its
//! item has left the collection, in which case it matches nothing.

use super::modes::EditSession;
use super::outcome::{DeleteToken, Outcome};
use super::state::ListState;
use crate::domain::{IntentError, Item, ItemDraft, ItemId, ItemPatch, NewItem};
use crate::service::CollectionService;
use crate::ui::viewmodel::ListView;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::Instrument;

/// Result of every intent.
pub type IntentResult = std::result::Result<Outcome, IntentError>;

/// Keeps local list state synchronized with a remote collection.
///
/// # Example
///
/// ```rust
/// use todo_sync::app::{ListController, Outcome};
/// use todo_sync::domain::ItemDraft;
/// use todo_sync::service::InMemoryCollectionService;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), todo_sync::domain::IntentError> {
/// let controller = ListController::new(InMemoryCollectionService::new());
/// controller.load().await?;
///
/// let Outcome::Created(item) = controller.create(ItemDraft::new("Buy milk", "")).await? else {
///     unreachable!();
/// };
/// controller.toggle_complete(item.id).await?;
/// assert!(controller.items()[0].completed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ListController<S> {
    service: S,
    state: Mutex<ListState>,
    next_token: AtomicU64,
}

impl<S: CollectionService> ListController<S> {
    /// Creates a controller with an empty collection. Call [`load`](Self::load)
    /// to populate it.
    pub fn new(service: S) -> Self {
        Self::with_state(service, ListState::default())
    }

    /// Creates a controller starting from an existing state.
    pub fn with_state(service: S, state: ListState) -> Self {
        Self {
            service,
            state: Mutex::new(state),
            next_token: AtomicU64::new(1),
        }
    }

    /// The collection service this controller talks to.
    pub const fn service(&self) -> &S {
        &self.service
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the whole state.
    pub fn snapshot(&self) -> ListState {
        self.state().clone()
    }

    /// Copy of the collection.
    pub fn items(&self) -> Vec<Item> {
        self.state().items.clone()
    }

    /// Copy of the "new item" form buffers.
    pub fn compose(&self) -> ItemDraft {
        self.state().compose.clone()
    }

    /// The open edit session, if any.
    pub fn edit_session(&self) -> Option<EditSession> {
        self.state().edit.session().cloned()
    }

    /// Renderable view of the current state.
    pub fn view(&self) -> ListView {
        self.state().compute_view()
    }

    /// Replaces the collection with the store's full contents.
    ///
    /// On success any open edit session is discarded. On failure the
    /// collection is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::Remote`] if the fetch fails.
    pub async fn load(&self) -> IntentResult {
        let span = tracing::debug_span!("load");
        async {
            match self.service.list_all().await {
                Ok(items) => {
                    let count = items.len();
                    self.state().replace_all(items);
                    tracing::debug!(count = count, "collection loaded");
                    Ok(Outcome::Loaded { count })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load items");
                    Err(e.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Submits a new item built from `draft`.
    ///
    /// The draft is kept as the compose buffer first, so typed text survives
    /// both a blank-title rejection and a remote failure. On success the
    /// server's record (with its id and timestamps) is appended and the
    /// compose buffer is cleared.
    ///
    /// # Errors
    ///
    /// - [`IntentError::Validation`] if the title is blank; nothing is sent.
    /// - [`IntentError::Remote`] if the store rejects the request.
    pub async fn create(&self, draft: ItemDraft) -> IntentResult {
        let span = tracing::debug_span!("create_item", title_len = draft.title.len());
        async {
            let request = {
                let mut state = self.state();
                state.compose = draft;
                if let Err(e) = state.compose.validate() {
                    tracing::debug!(error = %e, "rejected new item");
                    return Err(e.into());
                }
                NewItem::from(&state.compose)
            };

            match self.service.create(&request).await {
                Ok(created) => {
                    let mut state = self.state();
                    state.append(created.clone());
                    state.compose = ItemDraft::default();
                    tracing::debug!(item_id = %created.id, count = state.items.len(), "item created");
                    Ok(Outcome::Created(created))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to create item");
                    Err(e.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Submits the current compose buffer.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub async fn submit_compose(&self) -> IntentResult {
        let draft = self.compose();
        self.create(draft).await
    }

    pub fn set_compose_title(&self, title: impl Into<String>) -> Outcome {
        self.state().compose.title = title.into();
        Outcome::DraftChanged
    }

    pub fn set_compose_description(&self, description: impl Into<String>) -> Outcome {
        self.state().compose.description = description.into();
        Outcome::DraftChanged
    }

    /// Opens an edit session on `id`, discarding any unsaved session.
    ///
    /// Returns [`Outcome::Unchanged`] if `id` is not in the collection.
    pub fn begin_edit(&self, id: ItemId) -> Outcome {
        let _span = tracing::debug_span!("begin_edit", item_id = %id).entered();

        if self.state().begin_edit(id) {
            Outcome::EditOpened(id)
        } else {
            tracing::debug!("edit target not in collection");
            Outcome::Unchanged
        }
    }

    /// Replaces the title buffer of the open edit session.
    pub fn set_edit_title(&self, title: impl Into<String>) -> Outcome {
        match self.state().edit.session_mut() {
            Some(session) => {
                session.set_title(title);
                Outcome::DraftChanged
            }
            None => Outcome::Unchanged,
        }
    }

    /// Replaces the description buffer of the open edit session.
    pub fn set_edit_description(&self, description: impl Into<String>) -> Outcome {
        match self.state().edit.session_mut() {
            Some(session) => {
                session.set_description(description);
                Outcome::DraftChanged
            }
            None => Outcome::Unchanged,
        }
    }

    /// Saves the open edit session as a title/description update.
    ///
    /// Completion state is never part of this request. On success the item
    /// is replaced by the server's record and the session closes (if it
    /// still targets that item). On any failure the session stays open.
    ///
    /// Returns [`Outcome::Unchanged`] when no session is open.
    ///
    /// # Errors
    ///
    /// - [`IntentError::Validation`] if the draft title is blank.
    /// - [`IntentError::Remote`] if the store rejects the update.
    pub async fn save_edit(&self) -> IntentResult {
        let span = tracing::debug_span!("save_edit", item_id = tracing::field::Empty);
        async {
            let (id, draft) = {
                let state = self.state();
                let Some(session) = state.edit.session() else {
                    tracing::debug!("save requested with no edit session open");
                    return Ok(Outcome::Unchanged);
                };
                tracing::Span::current().record("item_id", tracing::field::display(session.target()));
                if let Err(e) = session.draft().validate() {
                    tracing::debug!(error = %e, "rejected edit");
                    return Err(e.into());
                }
                (session.target(), session.draft().clone())
            };

            let patch = ItemPatch::content(draft.title, draft.description);

            match self.service.update(id, &patch).await {
                Ok(updated) => {
                    let mut state = self.state();
                    let applied = state.replace(updated.clone());
                    state.close_edit_for(id);
                    if applied {
                        tracing::debug!("edit saved");
                        Ok(Outcome::Updated(updated))
                    } else {
                        tracing::debug!("saved item no longer in collection");
                        Ok(Outcome::Unchanged)
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to save edit");
                    Err(e.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Discards the open edit session. No request is made.
    pub fn cancel_edit(&self) -> Outcome {
        if self.state().cancel_edit() {
            tracing::debug!("edit cancelled");
            Outcome::EditCancelled
        } else {
            Outcome::Unchanged
        }
    }

    /// Flips the item's completion state through the store.
    ///
    /// Only `completed` is sent. The server's record replaces the local one,
    /// so server-owned fields stay authoritative. Unknown ids are a no-op and
    /// send nothing.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::Remote`] if the store rejects the update; the
    /// collection is left unchanged and nothing is retried.
    pub async fn toggle_complete(&self, id: ItemId) -> IntentResult {
        let span = tracing::debug_span!("toggle_complete", item_id = %id);
        async {
            let completed = {
                let state = self.state();
                let Some(item) = state.find(id) else {
                    tracing::debug!("toggle target not in collection");
                    return Ok(Outcome::Unchanged);
                };
                !item.completed
            };

            match self.service.update(id, &ItemPatch::completion(completed)).await {
                Ok(updated) => {
                    if self.state().replace(updated.clone()) {
                        tracing::debug!(completed = updated.completed, "completion toggled");
                        Ok(Outcome::Updated(updated))
                    } else {
                        tracing::debug!("toggled item no longer in collection");
                        Ok(Outcome::Unchanged)
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to toggle item");
                    Err(e.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// First step of a delete: issues a confirmation token. Sends nothing.
    pub fn request_delete(&self, id: ItemId) -> DeleteToken {
        let token = DeleteToken::new(id, self.next_token.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(item_id = %id, token = token.seq(), "delete awaiting confirmation");
        token
    }

    /// Declines a pending delete. Sends nothing and changes nothing.
    pub fn decline_delete(&self, token: DeleteToken) -> Outcome {
        tracing::debug!(item_id = %token.id(), token = token.seq(), "delete declined");
        Outcome::Declined(token.id())
    }

    /// Second step of a delete: performs it.
    ///
    /// Unknown ids are a no-op and send nothing. On success the item is
    /// removed locally, and an edit session on it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::Remote`] if the store rejects the deletion;
    /// the collection is left unchanged.
    pub async fn confirm_delete(&self, token: DeleteToken) -> IntentResult {
        let id = token.id();
        let span = tracing::debug_span!("confirm_delete", item_id = %id, token = token.seq());
        async {
            let present = self.state().contains(id);
            if !present {
                tracing::debug!("delete target not in collection");
                return Ok(Outcome::Unchanged);
            }

            match self.service.delete(id).await {
                Ok(()) => {
                    let mut state = self.state();
                    state.close_edit_for(id);
                    if state.remove(id) {
                        tracing::debug!(count = state.items.len(), "item removed");
                        Ok(Outcome::Removed(id))
                    } else {
                        Ok(Outcome::Unchanged)
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to delete item");
                    Err(e.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs the whole delete gate with a caller-supplied yes/no decision.
    ///
    /// `approve` sees the item about to be deleted and is not called for
    /// unknown ids.
    ///
    /// # Errors
    ///
    /// Same as [`confirm_delete`](Self::confirm_delete).
    pub async fn remove<F>(&self, id: ItemId, approve: F) -> IntentResult
    where
        F: FnOnce(&Item) -> bool,
    {
        let item = self.state().find(id).cloned();
        let Some(item) = item else {
            tracing::debug!(item_id = %id, "delete target not in collection");
            return Ok(Outcome::Unchanged);
        };

        let token = self.request_delete(id);
        if approve(&item) {
            self.confirm_delete(token).await
        } else {
            Ok(self.decline_delete(token))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use crate::service::InMemoryCollectionService;
    use std::fmt;
    use std::sync::Arc;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;
    use tracing_subscriber::Layer;

    /// Records each event's message with the name of the span it fired in.
    #[derive(Clone, Default)]
    struct EventSpans(Arc<Mutex<Vec<(String, Option<String>)>>>);

    impl EventSpans {
        fn span_of(&self, message: &str) -> Option<String> {
            let events = self.0.lock().unwrap();
            let (_, span) = events
                .iter()
                .find(|(m, _)| m == message)
                .unwrap_or_else(|| panic!("no event {message:?} in {events:?}"));
            span.clone()
        }
    }

    struct Message(String);

    impl Visit for Message {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S> Layer<S> for EventSpans
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let mut message = Message(String::new());
            event.record(&mut message);
            let span = ctx.event_span(event).map(|span| span.name().to_string());
            self.0.lock().unwrap().push((message.0, span));
        }
    }

    #[tokio::test]
    async fn save_edit_logs_early_exits_inside_its_span() {
        let events = EventSpans::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let controller = ListController::with_state(
            InMemoryCollectionService::new(),
            ListState::new(vec![Item::new(ItemId::new(1), "A")]),
        );

        assert_eq!(controller.save_edit().await, Ok(Outcome::Unchanged));
        assert_eq!(
            events.span_of("save requested with no edit session open").as_deref(),
            Some("save_edit")
        );

        controller.begin_edit(ItemId::new(1));
        controller.set_edit_title("   ");
        assert!(controller.save_edit().await.is_err());
        assert_eq!(events.span_of("rejected edit").as_deref(), Some("save_edit"));
    }
}
