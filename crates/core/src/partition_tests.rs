// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn buckets() -> OperationDescriptor {
    OperationDescriptor::new("buckets", OperationCategory::MutableEntity).with_params(["bucket"])
}

#[test]
fn derive_is_deterministic() {
    let source = SourceDescriptor::new("packer", "http", "https://api.example/buckets");
    let a = PartitionKey::derive(&source, &buckets()).unwrap();
    let b = PartitionKey::derive(&source.clone(), &buckets()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "http:https://api.example/buckets#buckets");
    assert_eq!(a.source(), "http:https://api.example/buckets");
    assert_eq!(a.operation(), "buckets");
}

#[test]
fn source_name_is_not_part_of_identity() {
    let a = SourceDescriptor::new("one", "file", "data.json");
    let b = SourceDescriptor::new("two", "file", "data.json");
    assert_eq!(
        PartitionKey::derive(&a, &buckets()).unwrap(),
        PartitionKey::derive(&b, &buckets()).unwrap()
    );
}

#[test]
fn operations_partition_separately() {
    let source = SourceDescriptor::new("packer", "http", "https://api.example");
    let versions = OperationDescriptor::new("versions", OperationCategory::MutableEntity);
    assert_ne!(
        PartitionKey::derive(&source, &buckets()).unwrap(),
        PartitionKey::derive(&source, &versions).unwrap()
    );
}

#[test]
fn unrecognized_kind_is_identity_error() {
    let source = SourceDescriptor::new("legacy", "ftp", "ftp://example");
    let err = PartitionKey::derive(&source, &buckets()).unwrap_err();
    assert_eq!(
        err,
        IdentityError::UnrecognizedSourceKind {
            source_name: "legacy".to_string(),
            kind: "ftp".to_string(),
        }
    );
}

#[test]
fn empty_location_or_operation_is_identity_error() {
    let source = SourceDescriptor::new("s", "http", "  ");
    assert!(matches!(
        PartitionKey::derive(&source, &buckets()),
        Err(IdentityError::EmptyLocation { .. })
    ));

    let source = SourceDescriptor::new("s", "http", "https://x");
    let unnamed = OperationDescriptor::new("", OperationCategory::MutableEntity);
    assert!(matches!(
        PartitionKey::derive(&source, &unnamed),
        Err(IdentityError::EmptyOperationName { .. })
    ));
}

#[test]
fn category_deserializes_from_config_names() {
    #[derive(serde::Deserialize)]
    struct Op {
        category: OperationCategory,
    }

    let parse = |s: &str| -> OperationCategory {
        serde_json::from_str::<Op>(&format!(r#"{{"category":"{}"}}"#, s))
            .unwrap()
            .category
    };
    assert_eq!(parse("entity"), OperationCategory::MutableEntity);
    assert_eq!(parse("CREATE_NODE"), OperationCategory::MutableEntity);
    assert_eq!(parse("relation"), OperationCategory::AppendOnlyRelation);
    assert_eq!(parse("CREATE_RELATION"), OperationCategory::AppendOnlyRelation);
    assert!(serde_json::from_str::<Op>(r#"{"category":"edge"}"#).is_err());
}

#[test]
fn only_entities_track_state() {
    assert!(OperationCategory::MutableEntity.tracks_state());
    assert!(!OperationCategory::AppendOnlyRelation.tracks_state());
}
