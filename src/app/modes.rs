//! Edit-mode state machine.
//!
//! The list is either being viewed or exactly one item is being edited:
//!
//! ```text
//!            begin_edit(id)               begin_edit(other)
//!  Viewing ─────────────────▶ Editing(id) ─────────────────▶ Editing(other)
//!     ▲                          │                            (prior draft
//!     │   cancel_edit / save ok  │                             discarded)
//!     │   / successful load      │
//!     └──────────────────────────┘
//! ```
//!
//! A failed save or a blank title leaves the session open so the user can
//! retry or cancel.

use crate::domain::{Item, ItemDraft, ItemId};

/// Draft state of an in-progress edit.
///
/// The buffers are independent of the committed item until a save
/// succeeds; the item itself is never touched while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    target: ItemId,
    draft: ItemDraft,
}

impl EditSession {
    /// Opens a session seeded with the item's committed title and
    /// description.
    #[must_use]
    pub fn seeded_from(item: &Item) -> Self {
        Self {
            target: item.id,
            draft: ItemDraft::new(item.title.clone(), item.description.clone()),
        }
    }

    /// Id of the item being edited.
    #[must_use]
    pub const fn target(&self) -> ItemId {
        self.target
    }

    /// Current draft buffers.
    #[must_use]
    pub const fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }
}

/// Whether the list is being viewed or an item is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    /// No edit session open.
    #[default]
    Viewing,

    /// One item is being edited.
    Editing(EditSession),
}

impl EditMode {
    /// Returns the open session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&EditSession> {
        match self {
            Self::Viewing => None,
            Self::Editing(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            Self::Viewing => None,
            Self::Editing(session) => Some(session),
        }
    }

    /// Returns `true` if `id` is the item currently being edited.
    #[must_use]
    pub fn is_editing(&self, id: ItemId) -> bool {
        self.session().is_some_and(|session| session.target == id)
    }
}
