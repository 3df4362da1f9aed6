// tests/queue_property.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use watchrun::engine::EventQueue;
use watchrun::watch::ChangeKind;

const WATCHES: [&str; 3] = ["alpha", "beta", "gamma"];
const PATHS: [&str; 4] = ["/w/a", "/w/b", "/w/sub/c", "/w/sub/d"];

fn kind_strategy() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::Create),
        Just(ChangeKind::Write),
        Just(ChangeKind::Remove),
        Just(ChangeKind::Rename),
        Just(ChangeKind::AttributeChange),
    ]
}

proptest! {
    // Whatever the event sequence, draining after a swap yields exactly the
    // distinct (watch, path) pairs seen, each with the first kind observed.
    #[test]
    fn drained_batches_hold_first_kind_per_path(
        events in proptest::collection::vec(
            (0..WATCHES.len(), 0..PATHS.len(), kind_strategy()),
            1..40,
        )
    ) {
        let mut queue = EventQueue::new();
        let mut expected: BTreeMap<(String, PathBuf), ChangeKind> = BTreeMap::new();

        for (w, p, kind) in &events {
            queue.record(WATCHES[*w], Path::new(PATHS[*p]), *kind);
            expected
                .entry((WATCHES[*w].to_string(), PathBuf::from(PATHS[*p])))
                .or_insert(*kind);
        }

        queue.swap();

        let mut drained: BTreeMap<(String, PathBuf), ChangeKind> = BTreeMap::new();
        while let Some((watch, batch)) = queue.take_next_executing() {
            for (path, kind) in batch {
                drained.insert((watch.clone(), path), kind);
            }
        }

        prop_assert_eq!(drained, expected);
        prop_assert!(!queue.has_pending());
    }
}
