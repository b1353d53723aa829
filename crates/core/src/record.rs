// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized records produced by the transform step
//!
//! A [`Record`] is an unordered map from field name to JSON value. Records
//! belonging to a tracked category are viewed through [`EntityRecord`],
//! which guarantees a text `external_id`.

use crate::error::ReconcileError;
use crate::fingerprint::{fingerprint, Fingerprint};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity field every tracked record must carry
pub const EXTERNAL_ID: &str = "external_id";

/// Preferred change marker
pub const UPDATED_AT: &str = "updated_at";

/// Alternate spelling of the change marker used by some upstream APIs
pub const UPDATED_AT_DASHED: &str = "updated-at";

/// Positional change marker, used when no timestamp is available
pub const INDEX: &str = "index";

/// A single normalized record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deletion record: identity only, no other fields
    pub fn tombstone(external_id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(EXTERNAL_ID.to_string(), Value::String(external_id.into()));
        Self(fields)
    }

    /// Builder-style field insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The `external_id` field, if present and textual
    pub fn external_id(&self) -> Option<&str> {
        self.0
            .get(EXTERNAL_ID)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Convert a JSON value into a record. Only objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Field value if it counts as present: not null and not an empty string
    fn present(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

/// A record of a tracked category, with a guaranteed `external_id`
#[derive(Debug, Clone, Copy)]
pub struct EntityRecord<'a> {
    external_id: &'a str,
    record: &'a Record,
}

impl<'a> EntityRecord<'a> {
    /// Validate a record. `position` is its index in the snapshot, used for errors.
    pub fn try_from_record(record: &'a Record, position: usize) -> Result<Self, ReconcileError> {
        let external_id = record
            .external_id()
            .ok_or(ReconcileError::MissingField {
                field: EXTERNAL_ID,
                position,
            })?;
        Ok(Self {
            external_id,
            record,
        })
    }

    pub fn external_id(&self) -> &'a str {
        self.external_id
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    pub fn updated_at(&self) -> Option<&'a Value> {
        self.record.present(UPDATED_AT)
    }

    pub fn updated_at_dashed(&self) -> Option<&'a Value> {
        self.record.present(UPDATED_AT_DASHED)
    }

    pub fn index(&self) -> Option<&'a Value> {
        self.record.present(INDEX)
    }

    /// First present change marker in priority order
    pub fn change_marker(&self) -> Option<(&'static str, &'a Value)> {
        change_marker(self.record)
    }

    pub fn fingerprint(&self) -> Result<Fingerprint, ReconcileError> {
        fingerprint(self.record)
    }
}

/// First present change marker of any record, in priority order
pub(crate) fn change_marker(record: &Record) -> Option<(&'static str, &Value)> {
    [UPDATED_AT, UPDATED_AT_DASHED, INDEX]
        .into_iter()
        .find_map(|field| record.present(field).map(|value| (field, value)))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
