// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Partitioned state store
//!
//! Holds, per partition, the fingerprint of every record that was last
//! committed downstream. The store has no internal locking: it is owned by
//! a single reconciler and all mutation goes through `&mut self`.

use crate::fingerprint::Fingerprint;
use crate::partition::PartitionKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Committed view of one partition: `external_id -> fingerprint`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionState {
    entries: BTreeMap<String, Fingerprint>,
}

impl PartitionState {
    pub fn get(&self, external_id: &str) -> Option<Fingerprint> {
        self.entries.get(external_id).copied()
    }

    pub fn contains(&self, external_id: &str) -> bool {
        self.entries.contains_key(external_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in `external_id` order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Fingerprint)> {
        self.entries.iter().map(|(id, fp)| (id.as_str(), *fp))
    }

    /// Remove and return an entry. Used on the reconciler's working copy.
    pub(crate) fn take(&mut self, external_id: &str) -> Option<Fingerprint> {
        self.entries.remove(external_id)
    }

    /// Remaining ids in sorted order
    pub(crate) fn into_ids(self) -> impl Iterator<Item = String> {
        self.entries.into_keys()
    }

    fn upsert(&mut self, external_id: String, fingerprint: Fingerprint) {
        self.entries.insert(external_id, fingerprint);
    }
}

impl FromIterator<(String, Fingerprint)> for PartitionState {
    fn from_iter<T: IntoIterator<Item = (String, Fingerprint)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// All partitions known to this process
#[derive(Debug, Default)]
pub struct StateStore {
    partitions: HashMap<PartitionKey, PartitionState>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a partition, creating an empty one on first use
    pub fn get_or_create_partition(&mut self, key: &PartitionKey) -> &mut PartitionState {
        self.partitions.entry(key.clone()).or_default()
    }

    pub fn partition(&self, key: &PartitionKey) -> Option<&PartitionState> {
        self.partitions.get(key)
    }

    pub fn is_tracked(&self, key: &PartitionKey) -> bool {
        self.partitions.contains_key(key)
    }

    /// Deep copy of a partition's committed state (empty if untracked)
    pub fn snapshot(&self, key: &PartitionKey) -> PartitionState {
        self.partitions.get(key).cloned().unwrap_or_default()
    }

    /// Apply a commit: upsert fingerprints, then remove deleted ids
    pub fn apply<U, D>(&mut self, key: &PartitionKey, upserts: U, deletions: D)
    where
        U: IntoIterator<Item = (String, Fingerprint)>,
        D: IntoIterator<Item = String>,
    {
        let partition = self.get_or_create_partition(key);
        for (external_id, fingerprint) in upserts {
            partition.upsert(external_id, fingerprint);
        }
        for external_id in deletions {
            partition.take(&external_id);
        }
    }

    /// Number of tracked partitions
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn partitions(&self) -> impl Iterator<Item = (&PartitionKey, &PartitionState)> {
        self.partitions.iter()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
