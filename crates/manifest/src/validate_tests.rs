// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parse_manifest;
use gsync_core::IdentityError;
use std::path::Path;

fn parse(content: &str) -> Result<Manifest, ManifestError> {
    parse_manifest(content, Path::new("/work"))
}

#[yare::parameterized(
    simple = { "bucket", true },
    underscore_start = { "_private", true },
    mixed = { "HAS_VERSION2", true },
    empty = { "", false },
    digit_start = { "1bucket", false },
    dash = { "has-version", false },
    backtick = { "a`b", false },
    space = { "a b", false },
)]
fn identifiers(value: &str, valid: bool) {
    assert_eq!(is_identifier(value), valid);
}

#[test]
fn no_sources() {
    assert!(matches!(parse(""), Err(ManifestError::NoSources)));
}

#[test]
fn duplicate_source_names() {
    let content = r#"
[[source]]
name = "a"
kind = "file"
url = "one.json"

[[source]]
name = "a"
kind = "file"
url = "two.json"
"#;
    assert!(matches!(parse(content), Err(ManifestError::DuplicateSource(n)) if n == "a"));
}

#[test]
fn duplicate_operation_names() {
    let content = r#"
[[source]]
name = "a"
kind = "file"
url = "one.json"

[[source.operation]]
name = "buckets"
category = "entity"
params = ["bucket"]
transform = "x.j2"

[[source.operation]]
name = "buckets"
category = "entity"
params = ["bucket"]
transform = "y.j2"
"#;
    assert!(matches!(
        parse(content),
        Err(ManifestError::DuplicateOperation { ref operation, .. }) if operation == "buckets"
    ));
}

#[yare::parameterized(
    entity_without_label = { "entity", "[]" },
    entity_with_two = { "entity", r#"["a", "b"]"# },
    relation_with_one = { "relation", r#"["a"]"# },
)]
fn wrong_param_count(category: &str, params: &str) {
    let content = format!(
        r#"
[[source]]
name = "a"
kind = "file"
url = "one.json"

[[source.operation]]
name = "op"
category = "{category}"
params = {params}
transform = "x.j2"
"#
    );
    assert!(matches!(
        parse(&content),
        Err(ManifestError::InvalidParams { .. })
    ));
}

#[test]
fn invalid_label() {
    let content = r#"
[[source]]
name = "a"
kind = "file"
url = "one.json"

[[source.operation]]
name = "op"
category = "relation"
params = ["bucket", "HAS VERSION", "version"]
transform = "x.j2"
"#;
    assert!(matches!(
        parse(content),
        Err(ManifestError::InvalidIdentifier { ref value, .. }) if value == "HAS VERSION"
    ));
}

#[test]
fn unrecognized_source_kind() {
    let content = r#"
[[source]]
name = "a"
kind = "ftp"
url = "ftp://host/file"
"#;
    assert!(matches!(
        parse(content),
        Err(ManifestError::Identity(IdentityError::UnrecognizedSourceKind { .. }))
    ));
}

#[test]
fn empty_location() {
    let content = r#"
[[source]]
name = "a"
kind = "http"
url = ""

[[source.operation]]
name = "op"
category = "entity"
params = ["bucket"]
transform = "x.j2"
"#;
    assert!(matches!(
        parse(content),
        Err(ManifestError::Identity(IdentityError::EmptyLocation { .. }))
    ));
}

#[test]
fn shared_partition_between_sources() {
    let content = r#"
[[source]]
name = "a"
kind = "http"
url = "https://api.example/buckets"

[[source.operation]]
name = "buckets"
category = "entity"
params = ["bucket"]
transform = "x.j2"

[[source]]
name = "b"
kind = "http"
url = "https://api.example/buckets"

[[source.operation]]
name = "buckets"
category = "entity"
params = ["bucket"]
transform = "y.j2"
"#;
    assert!(matches!(
        parse(content),
        Err(ManifestError::DuplicatePartition { ref first, ref second, .. })
            if first == "a/buckets" && second == "b/buckets"
    ));
}
