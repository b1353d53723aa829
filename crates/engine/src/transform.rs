// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jinja templates turning source documents into records.
//!
//! Each operation names a template file. The template renders against the
//! fetched document and must produce a JSON array of objects:
//!
//! ```text
//! [
//! {%- for b in buckets %}
//!   {"external_id": {{ b.slug | tojson }}, "updated_at": {{ b.updated_at | tojson }}}
//!   {%- if not loop.last %},{% endif %}
//! {%- endfor %}
//! ]
//! ```
//!
//! The document's top-level fields are available directly, and the whole
//! document as `data`. Functions `add(a, b)` and `sub(a, b)` do integer
//! arithmetic.

use gsync_core::Record;
use minijinja::{AutoEscape, Environment, Error as TemplateError, ErrorKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or rendering a transform
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cannot read template {path}: {source}")]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template {path} is not loaded")]
    NotLoaded { path: PathBuf },
    #[error("rendering {path} failed: {message}")]
    Render { path: PathBuf, message: String },
    #[error("{path} did not render a JSON array of objects: {message}")]
    Output { path: PathBuf, message: String },
}

/// Renders operation templates, each read from disk once
pub struct Transformer {
    env: Environment<'static>,
    sources: HashMap<PathBuf, String>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Output is JSON, never HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_function("add", |a: i64, b: i64| {
            a.checked_add(b).ok_or_else(|| overflow("add", a, b))
        });
        env.add_function("sub", |a: i64, b: i64| {
            a.checked_sub(b).ok_or_else(|| overflow("sub", a, b))
        });
        env.add_filter("tojson", to_json);
        Self {
            env,
            sources: HashMap::new(),
        }
    }

    /// Read a template file unless it is already loaded
    pub fn load(&mut self, path: &Path) -> Result<(), TransformError> {
        if self.sources.contains_key(path) {
            return Ok(());
        }
        let source = std::fs::read_to_string(path).map_err(|source| TransformError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        self.sources.insert(path.to_path_buf(), source);
        Ok(())
    }

    /// Register template text under a path without touching the filesystem
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.sources.insert(path.into(), source.into());
    }

    /// Render the template at `path` and parse its output into records
    pub fn render(
        &self,
        path: &Path,
        document: &serde_json::Value,
    ) -> Result<Vec<Record>, TransformError> {
        let source = self
            .sources
            .get(path)
            .ok_or_else(|| TransformError::NotLoaded {
                path: path.to_path_buf(),
            })?;
        let render_err = |e: TemplateError| TransformError::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let name = path.display().to_string();
        let output = self
            .env
            .render_named_str(&name, source, context(document))
            .map_err(render_err)?;

        parse_records(&output).map_err(|message| TransformError::Output {
            path: path.to_path_buf(),
            message,
        })
    }
}

fn context(document: &serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    let mut ctx = match document {
        serde_json::Value::Object(fields) => fields.clone(),
        _ => serde_json::Map::new(),
    };
    ctx.insert("data".to_string(), document.clone());
    ctx
}

fn to_json(value: minijinja::Value) -> Result<String, TemplateError> {
    serde_json::to_string(&value)
        .map_err(|e| TemplateError::new(ErrorKind::InvalidOperation, e.to_string()))
}

fn parse_records(output: &str) -> Result<Vec<Record>, String> {
    let value: serde_json::Value = serde_json::from_str(output).map_err(|e| e.to_string())?;
    let serde_json::Value::Array(items) = value else {
        return Err("top level is not an array".to_string());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            Record::from_value(item).ok_or_else(|| format!("item {} is not an object", position))
        })
        .collect()
}

fn overflow(name: &str, a: i64, b: i64) -> TemplateError {
    TemplateError::new(
        ErrorKind::InvalidOperation,
        format!("{}({}, {}) overflows a 64-bit integer", name, a, b),
    )
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
