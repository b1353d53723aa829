// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::partition::{OperationCategory, OperationDescriptor, SourceDescriptor};

fn key(operation: &str) -> PartitionKey {
    let source = SourceDescriptor::new("src", "http", "https://api.example");
    let op = OperationDescriptor::new(operation, OperationCategory::MutableEntity);
    PartitionKey::derive(&source, &op).unwrap()
}

#[test]
fn partition_created_lazily() {
    let mut store = StateStore::new();
    let k = key("nodes");
    assert!(!store.is_tracked(&k));
    assert!(store.snapshot(&k).is_empty());
    // snapshot does not create
    assert!(store.is_empty());

    store.get_or_create_partition(&k);
    assert!(store.is_tracked(&k));
    assert_eq!(store.len(), 1);
}

#[test]
fn apply_upserts_and_deletes() {
    let mut store = StateStore::new();
    let k = key("nodes");
    store.apply(
        &k,
        [
            ("a".to_string(), Fingerprint::new(1)),
            ("b".to_string(), Fingerprint::new(2)),
        ],
        Vec::<String>::new(),
    );
    store.apply(
        &k,
        [("a".to_string(), Fingerprint::new(10))],
        ["b".to_string()],
    );

    let partition = store.partition(&k).unwrap();
    assert_eq!(partition.get("a"), Some(Fingerprint::new(10)));
    assert!(!partition.contains("b"));
    assert_eq!(partition.len(), 1);
}

#[test]
fn deleting_unknown_id_is_harmless() {
    let mut store = StateStore::new();
    let k = key("nodes");
    store.apply(&k, Vec::new(), ["ghost".to_string()]);
    assert!(store.partition(&k).unwrap().is_empty());
}

#[test]
fn snapshot_is_independent_copy() {
    let mut store = StateStore::new();
    let k = key("nodes");
    store.apply(&k, [("a".to_string(), Fingerprint::new(1))], Vec::new());

    let before = store.snapshot(&k);
    store.apply(&k, [("b".to_string(), Fingerprint::new(2))], ["a".to_string()]);

    assert_eq!(before.get("a"), Some(Fingerprint::new(1)));
    assert!(!before.contains("b"));
}

#[test]
fn partitions_do_not_share_entries() {
    let mut store = StateStore::new();
    store.apply(&key("one"), [("a".to_string(), Fingerprint::new(1))], Vec::new());
    store.apply(&key("two"), Vec::new(), ["a".to_string()]);

    assert!(store.partition(&key("one")).unwrap().contains("a"));
    assert_eq!(store.partitions().count(), 2);
}

#[test]
fn iteration_is_sorted_by_external_id() {
    let state: PartitionState = [
        ("c".to_string(), Fingerprint::new(3)),
        ("a".to_string(), Fingerprint::new(1)),
        ("b".to_string(), Fingerprint::new(2)),
    ]
    .into_iter()
    .collect();
    let ids: Vec<&str> = state.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
