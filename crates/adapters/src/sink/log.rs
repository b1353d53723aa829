// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::cypher::{index_statements, write_statements};
use super::{GraphSink, SinkError, WriteSummary};
use async_trait::async_trait;
use gsync_core::{Delta, OperationDescriptor};

/// Sink that logs the statements it would run
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

#[async_trait]
impl GraphSink for LogSink {
    async fn prepare(&self, ops: &[OperationDescriptor]) -> Result<(), SinkError> {
        for statement in index_statements(ops)? {
            tracing::info!(statement = %statement.statement, "would run");
        }
        Ok(())
    }

    async fn write(
        &self,
        op: &OperationDescriptor,
        delta: &Delta,
    ) -> Result<WriteSummary, SinkError> {
        let statements = write_statements(op, delta)?;
        for statement in &statements {
            tracing::info!(
                operation = %op.name,
                statement = %statement.statement,
                parameters = %statement.parameters,
                "would run"
            );
        }
        Ok(WriteSummary::for_delta(statements.len(), delta))
    }
}
