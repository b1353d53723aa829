// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph sinks applying deltas downstream

pub mod cypher;
mod http;
mod log;

pub use http::CypherHttpSink;
pub use log::LogSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSink, SinkCall};

use async_trait::async_trait;
use gsync_core::{Delta, OperationDescriptor};
use serde::Serialize;
use thiserror::Error;

/// Errors from writing to the graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("graph rejected the transaction: {}", .0.join("; "))]
    Rejected(Vec<String>),
    #[error("invalid sink response: {0}")]
    InvalidResponse(String),
    #[error("{0:?} is not a valid label or relationship type")]
    InvalidIdentifier(String),
    #[error("operation {operation} takes {expected} params, got {found}")]
    InvalidParams {
        operation: String,
        expected: usize,
        found: usize,
    },
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// What a write sent downstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub statements: usize,
    pub created: usize,
    pub deleted: usize,
}

impl WriteSummary {
    pub fn for_delta(statements: usize, delta: &Delta) -> Self {
        Self {
            statements,
            created: delta.to_create.len(),
            deleted: delta.to_delete.len(),
        }
    }
}

/// Applies deltas to the graph store
///
/// A write either applies the whole delta or returns an error; the caller
/// commits state only after `Ok`.
#[async_trait]
pub trait GraphSink: Clone + Send + Sync + 'static {
    /// One-time setup before the first write, e.g. indexes
    async fn prepare(&self, ops: &[OperationDescriptor]) -> Result<(), SinkError>;

    /// Apply one operation's delta atomically
    async fn write(&self, op: &OperationDescriptor, delta: &Delta)
        -> Result<WriteSummary, SinkError>;
}
