//! Presentation layer.
//!
//! ```text
//! ListState → compute_view → ListView → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable list state
//! - [`renderer`]: Plain-text renderer used by the terminal shell

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{ListView, RowView};
