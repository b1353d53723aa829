// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source and operation definitions

use gsync_core::{OperationCategory, OperationDescriptor, SourceDescriptor};
use serde::Deserialize;
use std::path::PathBuf;

/// A `[[source]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDef {
    pub name: String,
    /// `http` or `file`
    pub kind: String,
    /// Endpoint URL, or a path for file sources
    pub url: String,
    #[serde(default, rename = "operation")]
    pub operations: Vec<OperationDef>,
}

impl SourceDef {
    pub fn descriptor(&self) -> SourceDescriptor {
        SourceDescriptor::new(&self.name, &self.kind, &self.url)
    }
}

/// A `[[source.operation]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationDef {
    pub name: String,
    pub category: OperationCategory,
    /// `[label]` for entities, `[from, rel, to]` for relations
    #[serde(default)]
    pub params: Vec<String>,
    /// Template turning the fetched document into records
    pub transform: PathBuf,
}

impl OperationDef {
    pub fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor::new(&self.name, self.category).with_params(self.params.iter().cloned())
    }
}
