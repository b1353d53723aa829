//! Manifest validation specs
//!
//! Verify that `gsync validate` accepts well-formed manifests and explains
//! what is wrong with the rest.

use crate::prelude::*;

#[test]
fn minimal_manifest_is_valid() {
    let temp = Project::minimal();

    temp.gsync()
        .args(&["validate"])
        .passes()
        .stdout_has("Manifest OK: 1 sources, 1 operations")
        .stdout_has("journal: ");
}

#[test]
fn relation_operation_lists_three_params() {
    let temp = Project::minimal();
    temp.file(
        "gsync.toml",
        &format!("{MINIMAL_MANIFEST}{OWNERSHIP_OPERATION}"),
    );
    temp.file("transform/owned_by.j2", OWNED_BY_TEMPLATE);

    temp.gsync()
        .args(&["validate"])
        .passes()
        .stdout_has("local/owned_by (relation) [bucket, owned_by, team]");
}

#[test]
fn missing_sources_is_rejected() {
    let temp = Project::empty();
    temp.file("gsync.toml", "[sync]\ninterval = \"1m\"\n");

    temp.gsync()
        .args(&["validate"])
        .fails()
        .stderr_has("manifest declares no sources");
}

#[test]
fn unknown_field_is_rejected() {
    let temp = Project::minimal();
    temp.file(
        "gsync.toml",
        &MINIMAL_MANIFEST.replace("[state]", "[state]\nsnapshot = true"),
    );

    temp.gsync()
        .args(&["validate"])
        .fails()
        .stderr_has("snapshot");
}

#[test]
fn invalid_label_is_rejected() {
    let temp = Project::minimal();
    temp.file(
        "gsync.toml",
        &MINIMAL_MANIFEST.replace("[\"bucket\"]", "[\"bucket`) DETACH\"]"),
    );

    temp.gsync()
        .args(&["validate"])
        .fails()
        .stderr_has("not a valid label");
}

#[test]
fn unset_variable_is_named() {
    let temp = Project::minimal();
    temp.file(
        "gsync.toml",
        &MINIMAL_MANIFEST.replace("data/buckets.json", "${GSYNC_SPEC_UNSET_DATA}"),
    );

    temp.gsync()
        .args(&["validate"])
        .fails()
        .stderr_has("GSYNC_SPEC_UNSET_DATA")
        .stderr_has(".env");
}

#[test]
fn dotenv_in_working_directory_is_loaded() {
    let temp = Project::minimal();
    temp.file(
        "gsync.toml",
        &MINIMAL_MANIFEST.replace("data/buckets.json", "${GSYNC_SPEC_DATA}"),
    );
    temp.file(".env", "GSYNC_SPEC_DATA=data/buckets.json\n");

    temp.gsync().args(&["validate"]).passes();
}
