// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Partition identity
//!
//! Reconciliation state is partitioned by (data source, operation). The
//! descriptors here are what the orchestration hands to the reconciler;
//! [`PartitionKey::derive`] turns them into a stable key.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors deriving a partition key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("source {source_name}: unrecognized source kind '{kind}'")]
    UnrecognizedSourceKind { source_name: String, kind: String },
    #[error("source {source_name}: location is empty")]
    EmptyLocation { source_name: String },
    #[error("source {source_name}: operation name is empty")]
    EmptyOperationName { source_name: String },
}

/// How records of an operation are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationCategory {
    /// Nodes with an identity lifecycle: created, updated, and deleted
    #[serde(rename = "entity", alias = "CREATE_NODE")]
    MutableEntity,
    /// Relations re-asserted in full on every cycle, never deleted
    #[serde(rename = "relation", alias = "CREATE_RELATION")]
    AppendOnlyRelation,
}

impl OperationCategory {
    /// Whether the reconciler keeps committed state for this category
    pub fn tracks_state(self) -> bool {
        match self {
            OperationCategory::MutableEntity => true,
            OperationCategory::AppendOnlyRelation => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationCategory::MutableEntity => "entity",
            OperationCategory::AppendOnlyRelation => "relation",
        }
    }
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized kinds of data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Http,
    File,
}

impl SourceKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "http" => Some(SourceKind::Http),
            "file" => Some(SourceKind::File),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Http => "http",
            SourceKind::File => "file",
        }
    }
}

/// A configured data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Display name, not part of the identity
    pub name: String,
    /// Source kind as configured; resolved when the key is derived
    pub kind: String,
    /// URL or path the records are pulled from
    pub location: String,
}

impl SourceDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            location: location.into(),
        }
    }

    /// Resolve the configured kind
    pub fn source_kind(&self) -> Result<SourceKind, IdentityError> {
        SourceKind::parse(&self.kind).ok_or_else(|| IdentityError::UnrecognizedSourceKind {
            source_name: self.name.clone(),
            kind: self.kind.clone(),
        })
    }
}

/// A configured operation on a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: String,
    pub category: OperationCategory,
    /// Sink parameters: `[label]` for entities, `[from, rel, to]` for relations
    pub params: Vec<String>,
}

impl OperationDescriptor {
    pub fn new(name: impl Into<String>, category: OperationCategory) -> Self {
        Self {
            name: name.into(),
            category,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// Key of one reconciliation partition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionKey {
    source: String,
    operation: String,
}

impl PartitionKey {
    /// Derive the key for a source/operation pair
    pub fn derive(
        source: &SourceDescriptor,
        operation: &OperationDescriptor,
    ) -> Result<Self, IdentityError> {
        let kind = source.source_kind()?;
        if source.location.trim().is_empty() {
            return Err(IdentityError::EmptyLocation {
                source_name: source.name.clone(),
            });
        }
        if operation.name.trim().is_empty() {
            return Err(IdentityError::EmptyOperationName {
                source_name: source.name.clone(),
            });
        }
        Ok(Self {
            source: format!("{}:{}", kind.as_str(), source.location),
            operation: operation.name.clone(),
        })
    }

    /// Source identity, `<kind>:<location>`
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.source, self.operation)
    }
}

#[cfg(test)]
#[path = "partition_tests.rs"]
mod tests;
