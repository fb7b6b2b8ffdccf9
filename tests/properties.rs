//! Properties that hold for any collection, not just hand-picked ones.

mod common;

use common::RecordingService;
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::BTreeMap;
use std::future::Future;
use todo_sync::app::{ListController, ListState, Outcome};
use todo_sync::domain::{Item, ItemId};

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn to_items(entries: BTreeMap<i64, (String, String, bool)>) -> Vec<Item> {
    entries
        .into_iter()
        .map(|(id, (title, description, completed))| {
            Item::new(ItemId::new(id), title)
                .with_description(description)
                .with_completed(completed)
        })
        .collect()
}

/// Collections with unique ids, in any size up to `max`.
fn arb_items(min: usize, max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::btree_map(
        1i64..10_000,
        ("[a-zA-Z ]{1,12}", "[a-z ]{0,16}", any::<bool>()),
        min..=max,
    )
    .prop_map(to_items)
}

fn controller_for(items: &[Item]) -> ListController<RecordingService> {
    ListController::with_state(
        RecordingService::with_items(items.to_vec()),
        ListState::new(items.to_vec()),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Toggling or deleting an id outside the collection is a no-op that
    /// sends nothing.
    #[test]
    fn unknown_ids_never_change_the_collection(items in arb_items(0, 12), raw in 1i64..10_000) {
        prop_assume!(items.iter().all(|item| item.id != ItemId::new(raw)));
        let missing = ItemId::new(raw);
        let controller = controller_for(&items);

        let (toggled, removed, confirmed) = block_on(async {
            let toggled = controller.toggle_complete(missing).await;
            let removed = controller.remove(missing, |_| true).await;
            let token = controller.request_delete(missing);
            let confirmed = controller.confirm_delete(token).await;
            (toggled, removed, confirmed)
        });

        prop_assert_eq!(toggled, Ok(Outcome::Unchanged));
        prop_assert_eq!(removed, Ok(Outcome::Unchanged));
        prop_assert_eq!(confirmed, Ok(Outcome::Unchanged));
        prop_assert_eq!(controller.items(), items);
        prop_assert!(controller.service().calls().is_empty());
    }

    /// Two confirmed toggles restore the original completion state and
    /// leave every other item alone.
    #[test]
    fn double_toggle_restores_completion(items in arb_items(1, 12), pick in any::<Index>()) {
        let target = items[pick.index(items.len())].clone();
        let controller = controller_for(&items);

        let (first, second) = block_on(async {
            let first = controller.toggle_complete(target.id).await;
            let second = controller.toggle_complete(target.id).await;
            (first, second)
        });
        prop_assert!(first.is_ok());
        prop_assert!(second.is_ok());

        let after = controller.items();
        prop_assert_eq!(after.len(), items.len());
        for (before, now) in items.iter().zip(&after) {
            prop_assert_eq!(before.id, now.id);
            prop_assert_eq!(before.completed, now.completed);
            if before.id != target.id {
                prop_assert_eq!(before, now);
            }
        }
        prop_assert_eq!(controller.service().calls().len(), 2);
    }

    /// Opening an edit session, typing into it and cancelling leaves the
    /// whole state as it was.
    #[test]
    fn begin_then_cancel_is_identity(
        items in arb_items(1, 12),
        pick in any::<Index>(),
        title in ".{0,20}",
        description in ".{0,20}",
    ) {
        let target = items[pick.index(items.len())].id;
        let controller = controller_for(&items);
        let before = controller.snapshot();

        prop_assert_eq!(controller.begin_edit(target), Outcome::EditOpened(target));
        controller.set_edit_title(title);
        controller.set_edit_description(description);
        prop_assert_eq!(controller.cancel_edit(), Outcome::EditCancelled);

        prop_assert_eq!(controller.snapshot(), before);
        prop_assert!(controller.service().calls().is_empty());
    }
}
