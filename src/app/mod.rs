//! Application layer: list state and the controller that keeps it in sync.
//!
//! This module sits between front ends (the terminal shell in `main.rs`, or
//! any other UI) and the collection service. Front ends only send intents
//! and read views; they never touch the service directly.
//!
//! # Architecture
//!
//! ```text
//! Input → Intent → handle_intent → ListController ──request──→ CollectionService
//!                                        ↑                            │
//!                                        └───── apply response ───────┘
//!                                        │
//!                                   ListState → compute_view → ListView
//! ```
//!
//! # Modules
//!
//! - [`controller`]: The [`ListController`] and its operations
//! - [`handler`]: [`Intent`] values and their dispatch
//! - [`modes`]: Edit session state machine
//! - [`outcome`]: What each operation changed, and delete tokens
//! - [`state`]: Local collection, form buffers and view model computation

pub mod controller;
pub mod handler;
pub mod modes;
pub mod outcome;
pub mod state;

pub use controller::{IntentResult, ListController};
pub use handler::{handle_intent, Intent};
pub use modes::{EditMode, EditSession};
pub use outcome::{DeleteToken, Outcome};
pub use state::ListState;
