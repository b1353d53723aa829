// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content fingerprints for change detection
//!
//! A fingerprint is the CRC32 of exactly one input, chosen in priority
//! order: `updated_at`, `updated-at`, `index`, or the canonical JSON
//! serialization of the whole record. Canonical serialization sorts object
//! keys at every depth, so field order never affects the result.

use crate::error::ReconcileError;
use crate::record::{change_marker, Record};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// 32-bit content hash of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u32);

impl Fingerprint {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(crc32fast::hash(bytes))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Fingerprint a record
///
/// Text markers hash their UTF-8 bytes; any other marker value hashes its
/// canonical JSON text.
pub fn fingerprint(record: &Record) -> Result<Fingerprint, ReconcileError> {
    if let Some((_, marker)) = change_marker(record) {
        return match marker {
            Value::String(text) => Ok(Fingerprint::of_bytes(text.as_bytes())),
            other => Ok(Fingerprint::of_bytes(&serde_json::to_vec(&Canonical(other))?)),
        };
    }
    Ok(Fingerprint::of_bytes(&canonical_bytes(record.as_map())?))
}

/// Serialize a map with keys sorted at every depth
pub fn canonical_bytes(fields: &Map<String, Value>) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&sorted(fields))
}

fn sorted(fields: &Map<String, Value>) -> BTreeMap<&str, Canonical<'_>> {
    fields
        .iter()
        .map(|(key, value)| (key.as_str(), Canonical(value)))
        .collect()
}

/// Serializes a JSON value with object keys in sorted order, independent of
/// how the underlying map orders them.
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(fields) => sorted(fields).serialize(serializer),
            Value::Array(items) => serializer.collect_seq(items.iter().map(Canonical)),
            scalar => scalar.serialize(serializer),
        }
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
