// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Neo4j-style transactional HTTP sink

use super::cypher::{index_statements, write_statements, Statement};
use super::{GraphSink, SinkError, WriteSummary};
use crate::http;
use async_trait::async_trait;
use gsync_core::{Delta, OperationDescriptor};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Posts statements to a `/tx/commit` endpoint, one transaction per call
#[derive(Clone)]
pub struct CypherHttpSink {
    agent: ureq::Agent,
    url: Arc<str>,
    authorization: Option<Arc<str>>,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl CypherHttpSink {
    /// `authorization` is the full header value, e.g. `Basic bmVvNGo6c2VjcmV0`
    pub fn new(url: impl Into<String>, authorization: Option<String>, timeout: Duration) -> Self {
        Self {
            agent: http::agent(timeout),
            url: Arc::from(url.into()),
            authorization: authorization.map(Arc::from),
        }
    }

    async fn run(&self, statements: Vec<Statement>) -> Result<(), SinkError> {
        if statements.is_empty() {
            return Ok(());
        }
        let body = serde_json::json!({ "statements": statements }).to_string();
        let agent = self.agent.clone();
        let url = Arc::clone(&self.url);
        let authorization = self.authorization.clone();

        let response = http::run_blocking(
            move || {
                let http_err = |e: ureq::Error| SinkError::Http {
                    url: url.to_string(),
                    message: e.to_string(),
                };
                let mut request = agent
                    .post(&*url)
                    .header("Content-Type", "application/json")
                    .header("Accept", "application/json");
                if let Some(value) = authorization.as_deref() {
                    request = request.header("Authorization", value);
                }
                let mut response = request.send(body).map_err(http_err)?;
                http::read_body(&mut response).map_err(http_err)
            },
            SinkError::Unavailable,
        )
        .await?;

        check_response(&response)
    }
}

/// Fail if the endpoint reported statement errors
///
/// The endpoint rolls back the whole transaction when any statement fails.
pub(crate) fn check_response(body: &str) -> Result<(), SinkError> {
    let parsed: TxResponse =
        serde_json::from_str(body).map_err(|e| SinkError::InvalidResponse(e.to_string()))?;
    if parsed.errors.is_empty() {
        return Ok(());
    }
    Err(SinkError::Rejected(
        parsed
            .errors
            .into_iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect(),
    ))
}

#[async_trait]
impl GraphSink for CypherHttpSink {
    async fn prepare(&self, ops: &[OperationDescriptor]) -> Result<(), SinkError> {
        self.run(index_statements(ops)?).await
    }

    async fn write(
        &self,
        op: &OperationDescriptor,
        delta: &Delta,
    ) -> Result<WriteSummary, SinkError> {
        let statements = write_statements(op, delta)?;
        let count = statements.len();
        self.run(statements).await?;
        Ok(WriteSummary::for_delta(count, delta))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
