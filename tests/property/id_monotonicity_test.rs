//! Property-based tests for ID assignment.
//!
//! **Validates: ID monotonicity**
//!
//! Within a run, every new row or tag gets a larger ID than any handed out
//! before it, removals included. After a save and reload, new IDs are still
//! larger than every live ID.

use proptest::prelude::*;
use sbm::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait, NewRow};
use sbm::managers::tag_manager::{TagManager, TagManagerTrait};
use sbm::services::content_fetcher::ContentFetcher;
use sbm::services::prompt::AutoAnswer;
use sbm::storage::codec::{decode, encode};
use sbm::types::bookmark::RowId;
use sbm::types::errors::FetchError;
use sbm::types::store::Store;

struct NoFetch;

impl ContentFetcher for NoFetch {
    fn fetch_title(&self, _url: &str) -> Result<Option<String>, FetchError> {
        Ok(None)
    }
}

#[derive(Debug, Clone)]
enum Op {
    AddRow,
    /// Remove the n-th live row, wrapping.
    RemoveRow(usize),
    AddTag,
    /// Remove the n-th live tag, wrapping.
    RemoveTag(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddRow),
        2 => any::<usize>().prop_map(Op::RemoveRow),
        2 => Just(Op::AddTag),
        1 => any::<usize>().prop_map(Op::RemoveTag),
    ]
}

/// Applies `ops` and returns the row and tag IDs in allocation order.
///
/// New tags are named `{phase}tag{n}` so that separate calls on the same
/// store never collide with names that are still live.
fn apply(store: &mut Store, phase: &str, ops: &[Op]) -> (Vec<u32>, Vec<u32>) {
    let mut row_ids = Vec::new();
    let mut tag_ids = Vec::new();
    let mut tag_seq = 0;

    for op in ops {
        match op {
            Op::AddRow => {
                let added = BookmarkManager::new(store)
                    .add_row(
                        NewRow {
                            url: "https://example.com".to_string(),
                            title: Some("t".to_string()),
                            ..NewRow::default()
                        },
                        &NoFetch,
                    )
                    .expect("add_row should succeed");
                row_ids.push(added.row.id.get());
            }
            Op::RemoveRow(n) => {
                let live: Vec<RowId> = store.rows().iter().map(|(_, r)| r.id).collect();
                if !live.is_empty() {
                    let id = live[n % live.len()];
                    BookmarkManager::new(store)
                        .remove_row(id, &mut AutoAnswer(true))
                        .expect("row is live");
                }
            }
            Op::AddTag => {
                tag_seq += 1;
                let tag = TagManager::new(store)
                    .add_tag(&format!("{}tag{}", phase, tag_seq))
                    .expect("unique valid name");
                tag_ids.push(tag.id.get());
            }
            Op::RemoveTag(n) => {
                let live: Vec<String> = store.tags().iter().map(|(_, t)| t.id.to_string()).collect();
                if !live.is_empty() {
                    TagManager::new(store)
                        .remove_tag(&live[n % live.len()], &mut AutoAnswer(true))
                        .expect("tag is live");
                }
            }
        }
    }
    (row_ids, tag_ids)
}

// **Property: IDs strictly increase within a run**
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn ids_are_never_reused_in_a_run(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut store = Store::new();
        let (row_ids, tag_ids) = apply(&mut store, "run", &ops);

        prop_assert!(row_ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(tag_ids.windows(2).all(|w| w[0] < w[1]));
        if let Some(first) = row_ids.first() {
            prop_assert_eq!(*first, 1);
        }
        if let Some(first) = tag_ids.first() {
            prop_assert_eq!(*first, 1);
        }
    }
}

// **Property: IDs after reload exceed every live ID**
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn reload_resumes_past_live_ids(
        before in proptest::collection::vec(arb_op(), 0..30),
        after in proptest::collection::vec(arb_op(), 0..30),
    ) {
        let mut store = Store::new();
        apply(&mut store, "before", &before);
        let max_live_row = store.rows().iter().map(|(_, r)| r.id.get()).max().unwrap_or(0);
        let max_live_tag = store.tags().iter().map(|(_, t)| t.id.get()).max().unwrap_or(0);

        let mut reloaded = decode(&encode(&store)).expect("round trip");
        let (row_ids, tag_ids) = apply(&mut reloaded, "after", &after);

        prop_assert!(row_ids.iter().all(|id| *id > max_live_row));
        prop_assert!(tag_ids.iter().all(|id| *id > max_live_tag));
    }
}
