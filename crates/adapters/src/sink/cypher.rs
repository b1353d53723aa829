// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cypher statement construction
//!
//! Pure functions turning a delta into the parameterized statements a
//! Neo4j-style transactional endpoint runs. Records travel as the `$list`
//! parameter; labels and relationship types are interpolated, so they are
//! validated and backtick-quoted first.

use super::SinkError;
use gsync_core::{Delta, OperationCategory, OperationDescriptor, Record};
use serde::Serialize;
use serde_json::json;

/// One statement with its parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub statement: String,
    pub parameters: serde_json::Value,
}

impl Statement {
    fn with_list(statement: String, records: &[Record]) -> Self {
        Self {
            statement,
            parameters: json!({ "list": records }),
        }
    }
}

/// Quote a label or relationship type, rejecting anything but `[A-Za-z_][A-Za-z0-9_]*`
pub fn quote_identifier(name: &str) -> Result<String, SinkError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(SinkError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("`{}`", name))
}

fn param<'a>(op: &'a OperationDescriptor, index: usize) -> Result<&'a str, SinkError> {
    let expected = match op.category {
        OperationCategory::MutableEntity => 1,
        OperationCategory::AppendOnlyRelation => 3,
    };
    if op.params.len() != expected {
        return Err(SinkError::InvalidParams {
            operation: op.name.clone(),
            expected,
            found: op.params.len(),
        });
    }
    Ok(&op.params[index])
}

/// Statements applying `delta` for `op`, creates before deletes
///
/// Empty lists produce no statement, so an empty delta yields nothing.
pub fn write_statements(
    op: &OperationDescriptor,
    delta: &Delta,
) -> Result<Vec<Statement>, SinkError> {
    let mut statements = Vec::new();
    match op.category {
        OperationCategory::MutableEntity => {
            let label = quote_identifier(param(op, 0)?)?;
            if !delta.to_create.is_empty() {
                statements.push(Statement::with_list(
                    format!(
                        "UNWIND $list AS item MERGE (x:{} {{external_id: item.external_id}}) SET x = item",
                        label
                    ),
                    &delta.to_create,
                ));
            }
            if !delta.to_delete.is_empty() {
                statements.push(Statement::with_list(
                    format!(
                        "UNWIND $list AS item MATCH (x:{} {{external_id: item.external_id}}) DETACH DELETE x",
                        label
                    ),
                    &delta.to_delete,
                ));
            }
        }
        OperationCategory::AppendOnlyRelation => {
            let from = quote_identifier(param(op, 0)?)?;
            let rel = quote_identifier(param(op, 1)?)?;
            let to = quote_identifier(param(op, 2)?)?;
            if !delta.to_create.is_empty() {
                statements.push(Statement::with_list(
                    format!(
                        "UNWIND $list AS item MATCH (a:{} {{external_id: item.a_id}}) MATCH (b:{} {{external_id: item.b_id}}) MERGE (a)-[:{}]->(b)",
                        from, to, rel
                    ),
                    &delta.to_create,
                ));
            }
        }
    }
    Ok(statements)
}

/// Index statements for every entity label, deduplicated in first-seen order
pub fn index_statements(ops: &[OperationDescriptor]) -> Result<Vec<Statement>, SinkError> {
    let mut labels: Vec<&str> = Vec::new();
    for op in ops {
        if op.category == OperationCategory::MutableEntity {
            let label = param(op, 0)?;
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }
    labels
        .into_iter()
        .map(|label| {
            Ok(Statement {
                statement: format!(
                    "CREATE INDEX IF NOT EXISTS FOR (n:{}) ON (n.external_id)",
                    quote_identifier(label)?
                ),
                parameters: json!({}),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "cypher_tests.rs"]
mod tests;
