//! Collection service layer.
//!
//! The remote, authoritative store the list controller synchronizes with.
//!
//! # Modules
//!
//! - `backend`: The [`CollectionService`] trait
//! - `http`: REST adapter over `reqwest`
//! - `memory`: Process-local store with the same semantics

pub mod backend;
pub mod http;
pub mod memory;

pub use backend::CollectionService;
pub use http::HttpCollectionService;
pub use memory::InMemoryCollectionService;
