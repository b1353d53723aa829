// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::fetch::{FetchError, RecordFetcher};
use crate::sink::{GraphSink, SinkError, WriteSummary};
use async_trait::async_trait;
use gsync_core::{Delta, OperationDescriptor, SourceDescriptor};
use tracing::Instrument;

/// Wrapper that adds tracing to any RecordFetcher
#[derive(Clone)]
pub struct TracedFetcher<F> {
    inner: F,
}

impl<F> TracedFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F: RecordFetcher> RecordFetcher for TracedFetcher<F> {
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        token: Option<&str>,
    ) -> Result<serde_json::Value, FetchError> {
        let span = tracing::info_span!(
            "source.fetch",
            source = %source.name,
            kind = %source.kind,
            location = %source.location
        );

        async {
            tracing::debug!(authenticated = token.is_some(), "fetching");

            let start = std::time::Instant::now();
            let result = self.inner.fetch(source, token).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(document) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    items = document.as_array().map(Vec::len),
                    "fetched"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "fetch failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any GraphSink
#[derive(Clone)]
pub struct TracedSink<S> {
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: GraphSink> GraphSink for TracedSink<S> {
    async fn prepare(&self, ops: &[OperationDescriptor]) -> Result<(), SinkError> {
        let span = tracing::info_span!("sink.prepare", operations = ops.len());

        async {
            let result = self.inner.prepare(ops).await;
            match &result {
                Ok(()) => tracing::debug!("prepared"),
                Err(e) => tracing::error!(error = %e, "prepare failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn write(
        &self,
        op: &OperationDescriptor,
        delta: &Delta,
    ) -> Result<WriteSummary, SinkError> {
        let span = tracing::info_span!("sink.write", operation = %op.name, category = %op.category);

        async {
            if delta.is_empty() {
                tracing::trace!("empty delta");
            } else {
                tracing::info!(
                    to_create = delta.to_create.len(),
                    to_delete = delta.to_delete.len(),
                    "writing"
                );
            }

            let start = std::time::Instant::now();
            let result = self.inner.write(op, delta).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(summary) => tracing::info!(
                    statements = summary.statements,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "written"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "write failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
