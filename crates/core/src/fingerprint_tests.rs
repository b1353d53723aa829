// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

#[parameterized(
        updated_at = { "updated_at" },
        updated_at_dashed = { "updated-at" },
        index = { "index" },
    )]
fn marker_alone_determines_fingerprint(field: &str) {
    let a = record(json!({"external_id": "a", field: "v1", "name": "one"}));
    let b = record(json!({"external_id": "b", field: "v1", "name": "two"}));

    // Only the marker is hashed: other fields do not matter
    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    assert_eq!(fingerprint(&a).unwrap(), Fingerprint::of_bytes(b"v1"));
}

#[parameterized(
        updated_at = { "updated_at" },
        updated_at_dashed = { "updated-at" },
        index = { "index" },
    )]
fn marker_change_changes_fingerprint(field: &str) {
    let a = record(json!({"external_id": "a", field: "v1"}));
    let b = record(json!({"external_id": "a", field: "v2"}));
    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

#[test]
fn numeric_index_hashes_its_json_text() {
    let rec = record(json!({"external_id": "a", "index": 12}));
    assert_eq!(fingerprint(&rec).unwrap(), Fingerprint::of_bytes(b"12"));
}

#[test]
fn without_marker_whole_record_is_hashed() {
    let a = record(json!({"external_id": "a", "name": "one"}));
    let b = record(json!({"external_id": "a", "name": "two"}));
    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());

    let expected = Fingerprint::of_bytes(br#"{"external_id":"a","name":"one"}"#);
    assert_eq!(fingerprint(&a).unwrap(), expected);
}

#[test]
fn empty_marker_falls_back_to_whole_record() {
    let a = record(json!({"external_id": "a", "updated_at": "", "name": "one"}));
    let b = record(json!({"external_id": "a", "updated_at": "", "name": "two"}));
    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

#[test]
fn nested_objects_are_canonicalized() {
    let mut inner_ab = Map::new();
    inner_ab.insert("a".to_string(), json!(1));
    inner_ab.insert("b".to_string(), json!({"y": 2, "x": 1}));
    let mut inner_ba = Map::new();
    inner_ba.insert("b".to_string(), json!({"x": 1, "y": 2}));
    inner_ba.insert("a".to_string(), json!(1));

    let a = Record::new().with("external_id", "n").with("meta", inner_ab);
    let b = Record::new().with("meta", inner_ba).with("external_id", "n");
    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

#[test]
fn canonical_bytes_sort_keys() {
    let mut fields = Map::new();
    fields.insert("z".to_string(), json!([{"b": 1, "a": 2}]));
    fields.insert("a".to_string(), json!(null));
    let bytes = canonical_bytes(&fields).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"a":null,"z":[{"a":2,"b":1}]}"#
    );
}

#[test]
fn fingerprint_displays_as_hex() {
    assert_eq!(Fingerprint::new(0xab).to_string(), "000000ab");
}
