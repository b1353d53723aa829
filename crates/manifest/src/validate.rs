// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural checks run after a manifest deserializes

use crate::parser::{Manifest, ManifestError};
use gsync_core::{OperationCategory, PartitionKey};
use std::collections::{HashMap, HashSet};

/// True for names usable as a node label or relationship type
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    if manifest.sources.is_empty() {
        return Err(ManifestError::NoSources);
    }

    let mut source_names = HashSet::new();
    let mut partitions: HashMap<PartitionKey, String> = HashMap::new();

    for source in &manifest.sources {
        if !source_names.insert(source.name.as_str()) {
            return Err(ManifestError::DuplicateSource(source.name.clone()));
        }
        let descriptor = source.descriptor();
        descriptor.source_kind()?;

        let mut op_names = HashSet::new();
        for op in &source.operations {
            if !op_names.insert(op.name.as_str()) {
                return Err(ManifestError::DuplicateOperation {
                    source_name: source.name.clone(),
                    operation: op.name.clone(),
                });
            }

            let expected = match op.category {
                OperationCategory::MutableEntity => 1,
                OperationCategory::AppendOnlyRelation => 3,
            };
            if op.params.len() != expected {
                return Err(ManifestError::InvalidParams {
                    operation: op.name.clone(),
                    category: op.category,
                    expected,
                    found: op.params.len(),
                });
            }
            if let Some(bad) = op.params.iter().find(|p| !is_identifier(p)) {
                return Err(ManifestError::InvalidIdentifier {
                    operation: op.name.clone(),
                    value: bad.clone(),
                });
            }
            if op.transform.as_os_str().is_empty() {
                return Err(ManifestError::InvalidFormat(format!(
                    "source.{}.operation.{}.transform must not be empty",
                    source.name, op.name
                )));
            }

            let key = PartitionKey::derive(&descriptor, &op.descriptor())?;
            let owner = format!("{}/{}", source.name, op.name);
            if let Some(previous) = partitions.insert(key.clone(), owner.clone()) {
                return Err(ManifestError::DuplicatePartition {
                    key: key.to_string(),
                    first: previous,
                    second: owner,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
