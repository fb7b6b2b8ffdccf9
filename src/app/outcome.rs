//! Results of handled intents.
//!
//! Every controller operation resolves to an [`Outcome`] on success. Expected
//! failures (blank titles, remote errors) are `Err(IntentError)` values, and
//! addressing an id that is no longer in the collection resolves to
//! [`Outcome::Unchanged`].

use crate::domain::{Item, ItemId};

/// Single-use permission to delete one item.
///
/// Issued by `ListController::request_delete`. Passing it to
/// `confirm_delete` performs the deletion; passing it to `decline_delete`
/// or dropping it performs nothing. It cannot be cloned, so a confirmation
/// is spent exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a delete token does nothing unless confirmed or declined"]
pub struct DeleteToken {
    id: ItemId,
    seq: u64,
}

impl DeleteToken {
    pub(crate) const fn new(id: ItemId, seq: u64) -> Self {
        Self { id, seq }
    }

    /// The item this token would delete.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    pub(crate) const fn seq(&self) -> u64 {
        self.seq
    }
}

/// What an intent changed.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The collection was replaced by a full load of `count` items.
    Loaded { count: usize },

    /// The server confirmed a new item, now appended to the collection.
    Created(Item),

    /// The server returned an updated record, now replacing the local one.
    Updated(Item),

    /// The item was deleted remotely and removed locally.
    Removed(ItemId),

    /// An edit session was opened on this item.
    EditOpened(ItemId),

    /// The edit session was discarded without saving.
    EditCancelled,

    /// A compose or edit buffer changed.
    DraftChanged,

    /// A delete needs confirmation before anything is sent.
    AwaitingConfirmation(DeleteToken),

    /// The user declined a pending delete.
    Declined(ItemId),

    /// Nothing to do: the target id is not in the collection, no edit
    /// session is open, or a response found no matching item.
    Unchanged,
}

impl Outcome {
    /// Returns `true` if local state was left as it was.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged | Self::Declined(_))
    }
}
