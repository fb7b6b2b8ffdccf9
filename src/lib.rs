//! todo-sync: client-side state synchronization for a todo list.
//!
//! The crate keeps a local, ordered collection of todo items in step with a
//! remote store. Users act through intents (create, edit, toggle, delete);
//! each intent is validated locally, sent to the store, and the store's
//! response is applied to local state. Nothing is changed optimistically.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shell (main.rs)                           │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Intent dispatch                                  │
//! │  - ListController (request, then apply response)    │
//! │  - Edit session and delete confirmation             │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐         ┌───────────────────────┐
//! │ UI Layer (ui/)        │         │ Service Layer         │
//! │ - View model          │         │ (service/)            │
//! │ - Text rendering      │         │ - CollectionService   │
//! └───────────────────────┘         │ - HTTP / in-memory    │
//!                                   └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Item, ItemId, drafts and patches (domain/)       │
//! │  - Error types (domain/error)                       │
//! │  - Data and config paths (infrastructure/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + OpenTelemetry file export              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller, intents, edit sessions and list state
//! - [`domain`]: Items, ids, drafts, patches and errors
//! - [`service`]: The collection service trait and its implementations
//! - [`ui`]: View model and text renderer
//! - [`infrastructure`]: Filesystem locations
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/todo-sync/config.toml
//! base_url = "http://localhost:8080/api/todos"
//! request_timeout_secs = 10
//! trace_level = "debug"
//! data_dir = "~/.local/share/todo-sync"
//! ```
//!
//! `TODO_SYNC_BASE_URL` in the environment overrides `base_url`.
//!
//! # Example
//!
//! ```rust
//! use todo_sync::app::{handle_intent, Intent, ListController};
//! use todo_sync::service::InMemoryCollectionService;
//! use todo_sync::ui::render;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), todo_sync::domain::IntentError> {
//! let controller = ListController::new(InMemoryCollectionService::new());
//! handle_intent(&controller, Intent::Load).await?;
//! handle_intent(&controller, Intent::SetComposeTitle("Water plants".into())).await?;
//! handle_intent(&controller, Intent::SubmitCompose).await?;
//!
//! assert!(render(&controller.view()).contains("Water plants"));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod service;
pub mod ui;

pub use app::{handle_intent, Intent, ListController, ListState, Outcome};
pub use domain::{IntentError, Item, ItemId, Result, TodoSyncError};

use service::HttpCollectionService;
use std::collections::BTreeMap;
use std::path::Path;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/todos";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding [`Config::base_url`].
pub const BASE_URL_ENV: &str = "TODO_SYNC_BASE_URL";

/// Runtime configuration.
///
/// Read from a TOML file ([`Config::load`]), a flat string map
/// ([`Config::from_map`]), or left at its defaults. Both sources go through
/// the same tolerant parsing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Collection endpoint. Default: `http://localhost:8080/api/todos`
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Tracing filter directive, e.g. `debug` or `todo_sync=trace`.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the span export file. `~` is expanded.
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: trimmed; blank values keep the default
    /// - `request_timeout_secs`: `u64`, falls back to 10 on parse error or zero
    /// - `trace_level`, `data_dir`: taken as-is
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use todo_sync::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://todo.local/api/todos".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "http://todo.local/api/todos");
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let base_url = map
            .get("base_url")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), String::from);

        let request_timeout_secs = map
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            request_timeout_secs,
            trace_level: map.get("trace_level").cloned(),
            data_dir: map.get("data_dir").cloned(),
        }
    }

    /// Parses a TOML document.
    ///
    /// Top-level scalar values are flattened to strings and handed to
    /// [`Config::from_map`], so missing keys, zero timeouts and wrongly typed
    /// values fall back to their defaults exactly as they do there.
    ///
    /// # Errors
    ///
    /// Returns [`TodoSyncError::Config`] if the document is not valid TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text).map_err(|e| TodoSyncError::Config(e.to_string()))?;

        let map: BTreeMap<String, String> = table
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => {
                        tracing::debug!(key = %key, kind = other.type_str(), "ignoring non-scalar config value");
                        return None;
                    }
                };
                Some((key, text))
            })
            .collect();

        Ok(Self::from_map(&map))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TodoSyncError::Io`] if the file cannot be read, or
    /// [`TodoSyncError::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Applies `TODO_SYNC_BASE_URL` if it is set and non-blank.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// Replaces `base_url` with `url` if it is present and non-blank.
    #[must_use]
    pub fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        self
    }
}

/// Builds a controller backed by the HTTP collection service.
///
/// The collection starts empty; call `load` to fetch it.
///
/// # Errors
///
/// Returns [`TodoSyncError::Config`] for an empty base URL, or
/// [`TodoSyncError::Http`] if the HTTP client cannot be built.
///
/// # Example
///
/// ```rust
/// use todo_sync::{initialize, Config};
///
/// let controller = initialize(&Config::default())?;
/// assert!(controller.items().is_empty());
/// # Ok::<(), todo_sync::TodoSyncError>(())
/// ```
pub fn initialize(config: &Config) -> Result<ListController<HttpCollectionService>> {
    tracing::debug!(base_url = %config.base_url, "initializing todo-sync");
    let service = HttpCollectionService::new(config)?;
    Ok(ListController::new(service))
}
