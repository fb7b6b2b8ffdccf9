//! Todo item domain model.
//!
//! An [`Item`] is always a server-confirmed record: it carries the id the
//! store issued. Records that have not completed their creation round-trip
//! are [`NewItem`]s and have no id at all, so a provisional identity can
//! never leak into the collection.
//!
//! Identifiers are normalized to one canonical type, [`ItemId`], at every
//! ingress. User input goes through [`ItemId::from_str`]; wire data goes
//! through the `Deserialize` impl, which accepts either a JSON number or a
//! numeric string.

use crate::domain::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier of an item, as issued by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wraps a server-issued numeric id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single normalization function for textual ids.
///
/// Surrounding whitespace is ignored; anything else must be a base-10
/// signed integer.
///
/// # Examples
///
/// ```
/// use todo_sync::domain::ItemId;
///
/// let id: ItemId = " 42 ".parse().unwrap();
/// assert_eq!(id, ItemId::new(42));
/// assert!("abc".parse::<ItemId>().is_err());
/// ```
impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match WireId::deserialize(deserializer)? {
            WireId::Number(raw) => Ok(Self(raw)),
            WireId::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Server-owned timestamp, kept as the exact text the store sent.
///
/// The client never constructs these from a clock; they only arrive in
/// responses and are echoed back unchanged when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wraps timestamp text received from the store.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the calendar date, if the text is in a recognized format.
    ///
    /// Accepts RFC 3339 (`2024-01-01T10:00:00Z`), offset-less ISO date-times
    /// (`2024-01-01T10:00:00.123`) and plain dates (`2024-01-01`).
    #[must_use]
    pub fn date(&self) -> Option<chrono::NaiveDate> {
        let text = self.0.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    }
}

/// A todo entry confirmed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Item {
    /// Creates an item without timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_sync::domain::{Item, ItemId};
    ///
    /// let item = Item::new(ItemId::new(1), "A");
    /// assert!(!item.completed);
    /// assert!(item.created_at.is_none());
    /// ```
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            completed: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder-style description setter.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style completion setter.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns the creation date for display, or `"N/A"`.
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at
            .as_ref()
            .and_then(Timestamp::date)
            .map_or_else(|| "N/A".to_string(), |date| date.format("%Y-%m-%d").to_string())
    }
}

/// Title and description typed by the user, not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Checks the submission rule: the title must contain non-whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] for empty or blank titles.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            Err(ValidationError::EmptyTitle)
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}

/// Provisional record submitted on create. Has no id until the store
/// returns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl From<&ItemDraft> for NewItem {
    fn from(draft: &ItemDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: false,
        }
    }
}

/// Partial update. Absent fields are omitted from the request body and
/// must be left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ItemPatch {
    /// Patch produced by saving an edit: title and description only.
    pub fn content(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            completed: None,
        }
    }

    /// Patch produced by toggling completion: `completed` only.
    #[must_use]
    pub const fn completion(completed: bool) -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(completed),
        }
    }

    /// Applies the present fields to `item`, leaving the rest untouched.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
    }
}
