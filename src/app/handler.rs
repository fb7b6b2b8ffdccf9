//! Intent dispatch.
//!
//! Front ends translate user input into [`Intent`] values and pass them to
//! [`handle_intent`], which routes each one to the matching
//! [`ListController`] operation.
//!
//! # Intent Types
//!
//! - **Collection**: `Load`, `ToggleComplete`
//! - **Compose**: `SetComposeTitle`, `SetComposeDescription`, `SubmitCompose`, `Create`
//! - **Edit**: `BeginEdit`, `SetEditTitle`, `SetEditDescription`, `SaveEdit`, `CancelEdit`
//! - **Delete**: `RequestDelete`, then `ConfirmDelete` or `DeclineDelete`
//!
//! # Example
//!
//! ```rust
//! use todo_sync::app::{handle_intent, Intent, ListController, Outcome};
//! use todo_sync::service::InMemoryCollectionService;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), todo_sync::domain::IntentError> {
//! let controller = ListController::new(InMemoryCollectionService::new());
//!
//! handle_intent(&controller, Intent::SetComposeTitle("Buy milk".into())).await?;
//! let outcome = handle_intent(&controller, Intent::SubmitCompose).await?;
//! assert!(matches!(outcome, Outcome::Created(_)));
//! # Ok(())
//! # }
//! ```

use super::controller::{IntentResult, ListController};
use super::outcome::{DeleteToken, Outcome};
use crate::domain::{ItemDraft, ItemId};
use crate::service::CollectionService;
use tracing::Instrument;

/// A user intent against the list.
#[derive(Debug, PartialEq, Eq)]
pub enum Intent {
    /// Fetches the full collection.
    Load,

    SetComposeTitle(String),
    SetComposeDescription(String),
    /// Creates an item from the compose buffer.
    SubmitCompose,
    /// Creates an item from an explicit draft, replacing the compose buffer.
    Create(ItemDraft),

    /// Opens an edit session seeded from the item.
    BeginEdit(ItemId),
    SetEditTitle(String),
    SetEditDescription(String),
    SaveEdit,
    CancelEdit,

    ToggleComplete(ItemId),

    /// Asks for confirmation; resolves to [`Outcome::AwaitingConfirmation`].
    RequestDelete(ItemId),
    ConfirmDelete(DeleteToken),
    DeclineDelete(DeleteToken),
}

impl Intent {
    /// Short name used as the span field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::SetComposeTitle(_) => "set_compose_title",
            Self::SetComposeDescription(_) => "set_compose_description",
            Self::SubmitCompose => "submit_compose",
            Self::Create(_) => "create",
            Self::BeginEdit(_) => "begin_edit",
            Self::SetEditTitle(_) => "set_edit_title",
            Self::SetEditDescription(_) => "set_edit_description",
            Self::SaveEdit => "save_edit",
            Self::CancelEdit => "cancel_edit",
            Self::ToggleComplete(_) => "toggle_complete",
            Self::RequestDelete(_) => "request_delete",
            Self::ConfirmDelete(_) => "confirm_delete",
            Self::DeclineDelete(_) => "decline_delete",
        }
    }
}

/// Dispatches one intent to the controller.
///
/// # Errors
///
/// Returns whatever the underlying controller operation returns: a
/// validation error for blank titles, or a remote error when the
/// collection service fails.
pub async fn handle_intent<S: CollectionService>(
    controller: &ListController<S>,
    intent: Intent,
) -> IntentResult {
    let span = tracing::debug_span!("handle_intent", intent = intent.name());

    async move {
        match intent {
            Intent::Load => controller.load().await,
            Intent::SetComposeTitle(title) => Ok(controller.set_compose_title(title)),
            Intent::SetComposeDescription(text) => Ok(controller.set_compose_description(text)),
            Intent::SubmitCompose => controller.submit_compose().await,
            Intent::Create(draft) => controller.create(draft).await,
            Intent::BeginEdit(id) => Ok(controller.begin_edit(id)),
            Intent::SetEditTitle(title) => Ok(controller.set_edit_title(title)),
            Intent::SetEditDescription(text) => Ok(controller.set_edit_description(text)),
            Intent::SaveEdit => controller.save_edit().await,
            Intent::CancelEdit => Ok(controller.cancel_edit()),
            Intent::ToggleComplete(id) => controller.toggle_complete(id).await,
            Intent::RequestDelete(id) => {
                Ok(Outcome::AwaitingConfirmation(controller.request_delete(id)))
            }
            Intent::ConfirmDelete(token) => controller.confirm_delete(token).await,
            Intent::DeclineDelete(token) => Ok(controller.decline_delete(token)),
        }
    }
    .instrument(span)
    .await
}
