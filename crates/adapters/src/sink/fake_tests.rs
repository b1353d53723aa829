// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gsync_core::{OperationCategory, Record};

fn buckets() -> OperationDescriptor {
    OperationDescriptor::new("buckets", OperationCategory::MutableEntity).with_params(["bucket"])
}

#[tokio::test]
async fn fake_sink_tracks_nodes() {
    let sink = FakeSink::new();
    let delta = Delta {
        to_create: vec![
            Record::new().with("external_id", "a"),
            Record::new().with("external_id", "b"),
        ],
        ..Delta::default()
    };
    let summary = sink.write(&buckets(), &delta).await.unwrap();
    assert_eq!(summary.created, 2);
    assert_eq!(summary.statements, 1);
    assert_eq!(sink.nodes("buckets"), vec!["a", "b"]);

    let delta = Delta {
        to_delete: vec![Record::tombstone("a")],
        ..Delta::default()
    };
    sink.write(&buckets(), &delta).await.unwrap();
    assert_eq!(sink.nodes("buckets"), vec!["b"]);
}

#[tokio::test]
async fn fake_sink_failure_leaves_nodes() {
    let sink = FakeSink::new();
    sink.set_failing("buckets", true);
    let delta = Delta {
        to_create: vec![Record::new().with("external_id", "a")],
        ..Delta::default()
    };
    assert!(matches!(
        sink.write(&buckets(), &delta).await,
        Err(SinkError::Unavailable(_))
    ));
    assert!(sink.nodes("buckets").is_empty());
    assert_eq!(sink.calls().len(), 1);

    sink.set_failing("buckets", false);
    sink.write(&buckets(), &delta).await.unwrap();
    assert_eq!(sink.nodes("buckets"), vec!["a"]);
}
