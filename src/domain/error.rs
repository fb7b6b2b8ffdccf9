//! Error types for todo-sync.
//!
//! Two layers of errors live here. [`TodoSyncError`] covers setup concerns
//! (configuration, filesystem, HTTP client construction) and comes with the
//! [`Result`] alias. Intent-level failures are ordinary values: every
//! controller operation returns `Result<Outcome, IntentError>`, where
//! [`IntentError`] is either a local [`ValidationError`] or a
//! [`RemoteError`] reported by the collection service.
//!
//! An operation addressing an id that is no longer in the collection is not
//! an error at all; it resolves to `Outcome::Unchanged`.

use crate::domain::item::ItemId;
use thiserror::Error;

/// Crate-level error for setup and infrastructure failures.
///
/// # Examples
///
/// ```
/// use todo_sync::TodoSyncError;
///
/// fn validate_config() -> Result<(), TodoSyncError> {
///     Err(TodoSyncError::Config("base_url must not be empty".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum TodoSyncError {
    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(String),
}

/// A specialized `Result` type for setup operations.
pub type Result<T> = std::result::Result<T, TodoSyncError>;

/// Input rejected locally, before any request was issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title was empty or contained only whitespace.
    #[error("Please enter a title")]
    EmptyTitle,

    /// A textual identifier could not be normalized to an [`ItemId`].
    #[error("Invalid item id: {0:?}")]
    InvalidId(String),
}

/// A collection service call failed.
///
/// Local state is never partially updated when one of these is returned;
/// the user may retry by repeating the intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response (connection refused, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The store has no item with this id.
    #[error("item {0} not found")]
    NotFound(ItemId),
}

/// Failure of a user intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// Rejected locally; no request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The collection service call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl IntentError {
    /// Returns `true` if the failure happened before any request was issued.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
