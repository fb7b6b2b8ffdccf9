//! List state and its deterministic transitions.
//!
//! [`ListState`] is the single source of truth for everything the user
//! sees: the collection, the "new item" compose buffer and the edit mode.
//! It performs no I/O. The controller reads from it before issuing a request
//! and applies the response to it afterwards; every method here is one of
//! those synchronous steps.
//!
//! # Invariants
//!
//! - Item ids are unique within `items` at all times.
//! - Responses apply by id: replacing or removing an id that is no longer
//!   present finds no match and changes nothing.
//!
//! # Example
//!
//! ```rust
//! use todo_sync::app::ListState;
//! use todo_sync::domain::{Item, ItemId};
//!
//! let mut state = ListState::new(vec![Item::new(ItemId::new(1), "A")]);
//! assert!(state.replace(Item::new(ItemId::new(1), "A").with_completed(true)));
//! assert!(!state.replace(Item::new(ItemId::new(2), "B")));
//! assert_eq!(state.items.len(), 1);
//! ```

use super::modes::{EditMode, EditSession};
use crate::domain::{Item, ItemDraft, ItemId};
use crate::ui::viewmodel::{ListView, RowView};
use std::collections::HashSet;

/// Message shown when the collection is empty.
const EMPTY_MESSAGE: &str = "No todos yet. Add one to get started!";

/// Central state container owned by the list controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// The collection, in store order followed by local appends.
    pub items: Vec<Item>,

    /// Text typed into the "new item" form. Survives failed creates.
    pub compose: ItemDraft,

    /// Viewing, or editing exactly one item.
    pub edit: EditMode,
}

impl ListState {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        let mut state = Self::default();
        state.replace_all(items);
        state
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.find(id).is_some()
    }

    /// Overwrites the collection with a full load.
    ///
    /// Not a merge: local-only state is dropped, including any open edit
    /// session. Should the store ever return a duplicated id, only its first
    /// occurrence is kept.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        let mut seen = HashSet::with_capacity(items.len());
        let total = items.len();
        self.items = items.into_iter().filter(|item| seen.insert(item.id)).collect();

        if self.items.len() != total {
            tracing::warn!(
                received = total,
                kept = self.items.len(),
                "dropped items with duplicate ids from full load"
            );
        }

        self.edit = EditMode::Viewing;
    }

    /// Adds a newly created item at the end.
    ///
    /// If the id is already present the existing entry is replaced instead,
    /// keeping ids unique.
    pub fn append(&mut self, item: Item) {
        if let Some(existing) = self.items.iter_mut().find(|existing| existing.id == item.id) {
            tracing::debug!(item_id = %item.id, "created item already present, replacing");
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Replaces the item with the same id. Returns `false` if there was no
    /// match.
    pub fn replace(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Removes the item with this id. Returns `false` if there was no match.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Opens an edit session on `id`, discarding any prior session.
    ///
    /// Returns `false`, leaving the edit mode untouched, if `id` is not in
    /// the collection.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let Some(item) = self.find(id) else {
            return false;
        };
        let session = EditSession::seeded_from(item);

        if let Some(previous) = self.edit.session() {
            if previous.target() != id {
                tracing::debug!(previous = %previous.target(), "discarding unsaved edit session");
            }
        }

        self.edit = EditMode::Editing(session);
        true
    }

    /// Discards the open session. Returns `false` if none was open.
    pub fn cancel_edit(&mut self) -> bool {
        let was_open = self.edit.session().is_some();
        self.edit = EditMode::Viewing;
        was_open
    }

    /// Closes the session only if it still targets `id`.
    pub fn close_edit_for(&mut self, id: ItemId) -> bool {
        if self.edit.is_editing(id) {
            self.edit = EditMode::Viewing;
            true
        } else {
            false
        }
    }

    /// Derives the renderable view of the current state.
    #[must_use]
    pub fn compute_view(&self) -> ListView {
        let rows: Vec<RowView> = self
            .items
            .iter()
            .map(|item| RowView {
                id: item.id,
                title: item.title.clone(),
                description: item.description.clone(),
                completed: item.completed,
                created_label: item.created_label(),
                editing: self.edit.session().filter(|s| s.target() == item.id).map(|s| s.draft().clone()),
            })
            .collect();

        ListView {
            heading: format!("Todos ({})", rows.len()),
            empty_message: rows.is_empty().then(|| EMPTY_MESSAGE.to_string()),
            rows,
            compose: self.compose.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, title: &str) -> Item {
        Item::new(ItemId::new(id), title)
    }

    #[test]
    fn replace_all_overwrites_and_closes_edit() {
        let mut state = ListState::new(vec![item(1, "A"), item(2, "B")]);
        assert!(state.begin_edit(ItemId::new(1)));

        state.replace_all(vec![item(3, "C")]);

        assert_eq!(state.items, vec![item(3, "C")]);
        assert_eq!(state.edit, EditMode::Viewing);
    }

    #[test]
    fn replace_all_keeps_first_of_duplicate_ids() {
        let state = ListState::new(vec![item(1, "A"), item(1, "dup"), item(2, "B")]);
        assert_eq!(state.items, vec![item(1, "A"), item(2, "B")]);
    }

    #[test]
    fn append_keeps_ids_unique() {
        let mut state = ListState::new(vec![item(1, "A")]);
        state.append(item(2, "B"));
        state.append(item(2, "B2"));

        assert_eq!(state.items, vec![item(1, "A"), item(2, "B2")]);
    }

    #[test]
    fn replace_and_remove_report_missing_ids() {
        let mut state = ListState::new(vec![item(1, "A")]);
        let before = state.clone();

        assert!(!state.replace(item(9, "X")));
        assert!(!state.remove(ItemId::new(9)));
        assert_eq!(state, before);

        assert!(state.remove(ItemId::new(1)));
        assert!(state.items.is_empty());
    }

    #[test]
    fn begin_edit_seeds_from_item_and_replaces_prior_session() {
        let mut state = ListState::new(vec![
            item(1, "A").with_description("a"),
            item(2, "B").with_description("b"),
        ]);

        assert!(state.begin_edit(ItemId::new(1)));
        state.edit.session_mut().unwrap().set_title("changed");

        assert!(state.begin_edit(ItemId::new(2)));
        let session = state.edit.session().unwrap();
        assert_eq!(session.target(), ItemId::new(2));
        assert_eq!(session.draft(), &ItemDraft::new("B", "b"));
        assert_eq!(state.find(ItemId::new(1)).unwrap().title, "A");
    }

    #[test]
    fn begin_edit_on_missing_id_keeps_current_session() {
        let mut state = ListState::new(vec![item(1, "A")]);
        state.begin_edit(ItemId::new(1));

        assert!(!state.begin_edit(ItemId::new(5)));
        assert!(state.edit.is_editing(ItemId::new(1)));
    }

    #[test]
    fn close_edit_for_only_matches_current_target() {
        let mut state = ListState::new(vec![item(1, "A"), item(2, "B")]);
        state.begin_edit(ItemId::new(2));

        assert!(!state.close_edit_for(ItemId::new(1)));
        assert!(state.edit.is_editing(ItemId::new(2)));
        assert!(state.close_edit_for(ItemId::new(2)));
        assert_eq!(state.edit, EditMode::Viewing);
    }

    #[test]
    fn view_reports_count_empty_message_and_editing_row() {
        let empty = ListState::default().compute_view();
        assert_eq!(empty.heading, "Todos (0)");
        assert!(empty.empty_message.is_some());

        let mut state = ListState::new(vec![item(1, "A"), item(2, "B")]);
        state.begin_edit(ItemId::new(2));
        let view = state.compute_view();

        assert_eq!(view.heading, "Todos (2)");
        assert!(view.empty_message.is_none());
        assert!(view.rows[0].editing.is_none());
        assert_eq!(view.rows[1].editing, Some(ItemDraft::new("B", "")));
        assert_eq!(view.rows[1].created_label, "N/A");
    }
}
