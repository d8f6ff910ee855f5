// Integration tests for the section hash table

use std::num::NonZeroUsize;
use vconfig::config::hash::{
    djb2, CollisionPolicy, FastHash, HashError, Indexing, TableOptions,
};

fn options(collisions: CollisionPolicy, indexing: Indexing) -> TableOptions {
    TableOptions {
        collisions,
        indexing,
    }
}

#[test]
fn test_round_trip_many_keys() {
    let mut table: FastHash<usize> =
        FastHash::new(64, TableOptions::default(), None).expect("nonzero capacity");
    let keys: Vec<String> = (0..500).map(|i| format!("key-{i}")).collect();

    for (i, key) in keys.iter().enumerate() {
        let index = table.insert(key.as_bytes(), i).unwrap();
        assert_eq!(index, djb2(key.as_bytes()) as usize % 64);
    }
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(table.lookup(key.as_bytes()).map(|e| *e.data()), Some(i));
    }
    assert_eq!(table.len(), 500);
}

#[test]
fn test_reject_policy_leaves_first_entry() {
    let mut table = FastHash::with_buckets(
        NonZeroUsize::MIN,
        options(CollisionPolicy::Reject, Indexing::Tracked),
        None,
    );
    table.insert(b"first", "one").unwrap();

    let rejected = table.insert(b"second", "two").unwrap_err();
    assert_eq!(rejected.index, 0);
    assert_eq!(rejected.data, "two");

    assert_eq!(table.lookup(b"first").map(|e| *e.data()), Some("one"));
    assert!(table.lookup(b"second").is_none());
    assert_eq!(table.len(), 1);
}

#[test]
fn test_zero_capacity_is_an_error() {
    let result: Result<FastHash<()>, _> = FastHash::new(0, TableOptions::default(), None);
    assert_eq!(result.unwrap_err(), HashError::ZeroCapacity);
}

#[test]
fn test_teardown_cost_depends_on_indexing() {
    let mut tracked: FastHash<u8> = FastHash::new(
        1024,
        options(CollisionPolicy::Chain, Indexing::Tracked),
        None,
    )
    .unwrap();
    let mut untracked: FastHash<u8> = FastHash::new(
        1024,
        options(CollisionPolicy::Chain, Indexing::Untracked),
        None,
    )
    .unwrap();

    for key in [&b"a"[..], b"b", b"c"] {
        tracked.insert(key, 0).unwrap();
        untracked.insert(key, 0).unwrap();
    }

    let tracked = tracked.cleanup();
    let untracked = untracked.cleanup();
    assert_eq!(tracked.released, 3);
    assert_eq!(untracked.released, 3);
    assert_eq!(tracked.buckets_visited, 3);
    assert_eq!(untracked.buckets_visited, 1024);
}
