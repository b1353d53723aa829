// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake graph sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::cypher::write_statements;
use super::{GraphSink, SinkError, WriteSummary};
use async_trait::async_trait;
use gsync_core::{Delta, OperationDescriptor};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// Recorded sink call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Prepare {
        operations: Vec<String>,
    },
    Write {
        operation: String,
        created: Vec<String>,
        deleted: Vec<String>,
    },
}

#[derive(Default)]
struct FakeGraph {
    /// external ids per operation that are currently "in the graph"
    nodes: BTreeMap<String, BTreeSet<String>>,
    calls: Vec<SinkCall>,
    /// Fail writes for these operations
    failing: BTreeSet<String>,
}

/// In-memory sink that records writes and tracks node ids
#[derive(Clone, Default)]
pub struct FakeSink {
    inner: Arc<Mutex<FakeGraph>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes for `operation` fail (or succeed again)
    pub fn set_failing(&self, operation: &str, failing: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if failing {
            inner.failing.insert(operation.to_string());
        } else {
            inner.failing.remove(operation);
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SinkCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Ids written and not deleted for `operation`
    pub fn nodes(&self, operation: &str) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .nodes
            .get(operation)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GraphSink for FakeSink {
    async fn prepare(&self, ops: &[OperationDescriptor]) -> Result<(), SinkError> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .push(SinkCall::Prepare {
                operations: ops.iter().map(|op| op.name.clone()).collect(),
            });
        Ok(())
    }

    async fn write(
        &self,
        op: &OperationDescriptor,
        delta: &Delta,
    ) -> Result<WriteSummary, SinkError> {
        let statements = write_statements(op, delta)?;
        let created: Vec<String> = delta.created_ids().into_iter().map(String::from).collect();
        let deleted: Vec<String> = delta.deleted_ids().into_iter().map(String::from).collect();

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(SinkCall::Write {
            operation: op.name.clone(),
            created: created.clone(),
            deleted: deleted.clone(),
        });
        if inner.failing.contains(&op.name) {
            return Err(SinkError::Unavailable(format!(
                "fake failure writing {}",
                op.name
            )));
        }

        let nodes = inner.nodes.entry(op.name.clone()).or_default();
        nodes.extend(created);
        for id in &deleted {
            nodes.remove(id);
        }
        Ok(WriteSummary::for_delta(statements.len(), delta))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
