// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest TOML parsing

use crate::template::interpolate_env;
use crate::validate::validate;
use crate::{CredentialsDef, OperationDef, SinkDef, SourceDef, StateSettings, SyncSettings};
use gsync_core::{IdentityError, OperationCategory, SourceKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("environment variables not set: {}", .0.join(", "))]
    MissingEnv(Vec<String>),
    #[error("manifest declares no sources")]
    NoSources,
    #[error("duplicate source name: {0}")]
    DuplicateSource(String),
    #[error("source {source_name} declares operation {operation} twice")]
    DuplicateOperation {
        source_name: String,
        operation: String,
    },
    #[error("operation {operation} ({category}) takes {expected} params, got {found}")]
    InvalidParams {
        operation: String,
        category: OperationCategory,
        expected: usize,
        found: usize,
    },
    #[error("operation {operation}: {value:?} is not a valid label or relationship type")]
    InvalidIdentifier { operation: String, value: String },
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error("{first} and {second} share partition {key}")]
    DuplicatePartition {
        key: String,
        first: String,
        second: String,
    },
}

/// A parsed and validated manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub sync: SyncSettings,
    pub state: StateSettings,
    pub credentials: CredentialsDef,
    pub sink: SinkDef,
    pub sources: Vec<SourceDef>,
    /// Directory relative paths were resolved against
    pub base_dir: PathBuf,
}

impl Manifest {
    /// Every (source, operation) pair in declaration order
    pub fn operations(&self) -> impl Iterator<Item = (&SourceDef, &OperationDef)> {
        self.sources
            .iter()
            .flat_map(|source| source.operations.iter().map(move |op| (source, op)))
    }

    /// Look up a source by name
    pub fn get_source(&self, name: &str) -> Option<&SourceDef> {
        self.sources.iter().find(|s| s.name == name)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    sync: SyncSettings,
    #[serde(default)]
    state: StateSettings,
    #[serde(default)]
    credentials: CredentialsDef,
    #[serde(default)]
    sink: SinkDef,
    #[serde(default, rename = "source")]
    sources: Vec<SourceDef>,
}

/// Read, parse, and validate a manifest file
///
/// Relative paths inside the manifest resolve against its canonical
/// directory, so file-source partitions do not depend on how `path` is spelled.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let base_dir = dir.canonicalize().map_err(|source| ManifestError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    parse_manifest(&content, &base_dir)
}

/// Parse and validate manifest content
pub fn parse_manifest(content: &str, base_dir: &Path) -> Result<Manifest, ManifestError> {
    let mut raw: toml::Value = toml::from_str(content)?;
    if !raw.is_table() {
        return Err(ManifestError::InvalidFormat(
            "root must be a table".to_string(),
        ));
    }

    let mut missing = Vec::new();
    expand_strings(&mut raw, &mut missing);
    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        return Err(ManifestError::MissingEnv(missing));
    }

    let raw: RawManifest = raw.try_into()?;
    let mut manifest = Manifest {
        sync: raw.sync,
        state: raw.state,
        credentials: raw.credentials,
        sink: raw.sink,
        sources: raw.sources,
        base_dir: base_dir.to_path_buf(),
    };
    resolve_paths(&mut manifest);
    validate(&manifest)?;
    Ok(manifest)
}

fn expand_strings(value: &mut toml::Value, missing: &mut Vec<String>) {
    match value {
        toml::Value::String(s) => *s = interpolate_env(s, missing),
        toml::Value::Array(items) => {
            for item in items {
                expand_strings(item, missing);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                expand_strings(item, missing);
            }
        }
        _ => {}
    }
}

fn resolve_paths(manifest: &mut Manifest) {
    let base = manifest.base_dir.clone();
    if let Some(journal) = manifest.state.journal.as_mut() {
        *journal = resolve(&base, journal);
    }
    if let SinkDef::CypherHttp { authorization, .. } = &mut manifest.sink {
        if authorization.as_deref().is_some_and(|a| a.trim().is_empty()) {
            *authorization = None;
        }
    }
    for source in &mut manifest.sources {
        if SourceKind::parse(&source.kind) == Some(SourceKind::File) && !source.url.is_empty() {
            source.url = resolve(&base, Path::new(&source.url))
                .to_string_lossy()
                .into_owned();
        }
        for op in &mut source.operations {
            if !op.transform.as_os_str().is_empty() {
                op.transform = resolve(&base, &op.transform);
            }
        }
    }
}

/// Join onto `base` unless absolute; `.` components are dropped
fn resolve(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined.components().collect()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
