//! Sync cycle specs
//!
//! Verify `gsync plan` and `gsync once` against a file source and the log
//! sink, including state carried between invocations by the journal.

use crate::prelude::*;

#[test]
fn first_plan_creates_everything() {
    let temp = Project::minimal();

    temp.gsync()
        .args(&["plan"])
        .passes()
        .stdout_has("local/buckets (entity): 2 to create, 0 to delete, 0 unchanged")
        .stdout_lacks("statements");
}

#[test]
fn plan_leaves_no_journal() {
    let temp = Project::minimal();

    temp.gsync().args(&["plan"]).passes();
    temp.gsync()
        .args(&["plan"])
        .passes()
        .stdout_has("2 to create");

    assert!(!temp.path().join("state/commits.wal").exists());
}

#[test]
fn once_writes_then_nothing_changes() {
    let temp = Project::minimal();

    temp.gsync()
        .args(&["once"])
        .passes()
        .stdout_has("2 to create, 0 to delete, 0 unchanged [1 statements]");

    temp.gsync()
        .args(&["once"])
        .passes()
        .stdout_has("0 to create, 0 to delete, 2 unchanged");
}

#[test]
fn changed_and_removed_records_are_synced() {
    let temp = Project::minimal();
    temp.gsync().args(&["once"]).passes();

    temp.file(
        "data/buckets.json",
        r#"{"buckets": [{"slug": "web", "team": "edge", "updated_at": "2026-02-01"}]}"#,
    );

    let run = temp.gsync().args(&["once", "--format", "json"]).passes();
    let delta = &run.json()["operations"][0]["delta"];
    assert_eq!(delta["created"], 1);
    assert_eq!(delta["deleted"], 1);
    assert_eq!(delta["unchanged"], 0);
}

#[test]
fn relations_are_reasserted_every_cycle() {
    let temp = Project::minimal();
    temp.file(
        "gsync.toml",
        &format!("{MINIMAL_MANIFEST}{OWNERSHIP_OPERATION}"),
    );
    temp.file("transform/owned_by.j2", OWNED_BY_TEMPLATE);

    temp.gsync().args(&["once"]).passes();
    temp.gsync()
        .args(&["once"])
        .passes()
        .stdout_has("local/owned_by (relation): 2 to create, 0 to delete, 0 unchanged");
}

#[test]
fn missing_source_file_fails_the_cycle() {
    let temp = Project::minimal();
    std::fs::remove_file(temp.path().join("data/buckets.json")).unwrap();

    temp.gsync()
        .args(&["once"])
        .fails()
        .stderr_has("Sync cycle failed");
    assert!(temp.read("state/commits.wal").is_empty());
}

#[test]
fn template_without_ids_fails_the_cycle() {
    let temp = Project::minimal();
    temp.file("transform/buckets.j2", r#"[{"name": "web"}]"#);

    temp.gsync()
        .args(&["once"])
        .fails()
        .stderr_has("Sync cycle failed");
}
