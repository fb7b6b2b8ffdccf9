//! View model types representing renderable list state.
//!
//! View models are computed by `ListState::compute_view()` and consumed by
//! the renderer. They contain no logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use todo_sync::ui::viewmodel::{ListView, RowView};
//! use todo_sync::domain::{ItemDraft, ItemId};
//!
//! let view = ListView {
//!     heading: "Todos (1)".to_string(),
//!     rows: vec![RowView {
//!         id: ItemId::new(1),
//!         title: "Buy milk".to_string(),
//!         description: String::new(),
//!         completed: false,
//!         created_label: "2024-01-01".to_string(),
//!         editing: None,
//!     }],
//!     empty_message: None,
//!     compose: ItemDraft::default(),
//! };
//! assert_eq!(view.rows.len(), 1);
//! ```

use crate::domain::{ItemDraft, ItemId};

/// Complete view of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Section heading including the item count, e.g. `"Todos (3)"`.
    pub heading: String,

    /// One row per item, in collection order.
    pub rows: Vec<RowView>,

    /// Shown instead of rows when the collection is empty.
    pub empty_message: Option<String>,

    /// Current contents of the "new item" form.
    pub compose: ItemDraft,
}

/// Display information for a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub completed: bool,

    /// Creation date (`YYYY-MM-DD`) or `"N/A"`.
    pub created_label: String,

    /// Draft buffers when this row is in edit mode.
    pub editing: Option<ItemDraft>,
}
