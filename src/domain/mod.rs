//! Domain layer for todo-sync.
//!
//! Core types with no knowledge of transport, presentation or runtime.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result aliases
//! - [`item`]: Item model, canonical identifier, drafts and patches
//!
//! # Examples
//!
//! ```
//! use todo_sync::domain::{Item, ItemDraft, ItemId};
//!
//! let draft = ItemDraft::new("Buy milk", "");
//! assert!(draft.validate().is_ok());
//!
//! let item = Item::new(ItemId::new(7), "Buy milk");
//! assert_eq!(item.id.to_string(), "7");
//! ```

pub mod error;
pub mod item;

pub use error::{IntentError, RemoteError, Result, TodoSyncError, ValidationError};
pub use item::{Item, ItemDraft, ItemId, ItemPatch, NewItem, Timestamp};
