// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciler and commit protocol
//!
//! ```text
//! snapshot ──reconcile──> Delta ──sink write──> ok? ──commit──> StateStore
//!                │                                 │
//!                └── reads a copy of state         └── only writer of state
//! ```
//!
//! `reconcile` computes the delta between a fresh snapshot and the last
//! committed view of its partition without changing that view. `commit`
//! advances the view and must only be called once the downstream write for
//! the same delta has succeeded. A failed or abandoned cycle therefore
//! leaves state untouched and can simply be retried.

use crate::error::ReconcileError;
use crate::fingerprint::Fingerprint;
use crate::journal::{CommitJournal, CommitRecord, NoJournal};
use crate::partition::{OperationCategory, OperationDescriptor, PartitionKey, SourceDescriptor};
use crate::record::{EntityRecord, Record};
use crate::state::{PartitionState, StateStore};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Records to write and records to remove downstream
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Delta {
    /// New and changed records, emitted in snapshot order
    pub to_create: Vec<Record>,
    /// Deletion records carrying only `external_id`, in id order
    pub to_delete: Vec<Record>,
    /// Records that matched their committed fingerprint
    pub unchanged: usize,
}

impl Delta {
    /// A delta with nothing to write
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }

    pub fn created_ids(&self) -> Vec<&str> {
        self.to_create.iter().filter_map(Record::external_id).collect()
    }

    pub fn deleted_ids(&self) -> Vec<&str> {
        self.to_delete.iter().filter_map(Record::external_id).collect()
    }

    pub fn summary(&self) -> DeltaSummary {
        DeltaSummary {
            created: self.to_create.len(),
            deleted: self.to_delete.len(),
            unchanged: self.unchanged,
        }
    }
}

/// Counts of a delta, for reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeltaSummary {
    pub created: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl fmt::Display for DeltaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to create, {} to delete, {} unchanged",
            self.created, self.deleted, self.unchanged
        )
    }
}

/// Computes deltas and owns the committed state they are computed against
pub struct Reconciler<J = NoJournal> {
    store: StateStore,
    journal: J,
}

impl Reconciler<NoJournal> {
    /// In-memory reconciler; state is lost when the process exits
    pub fn new() -> Self {
        Self::with_journal(NoJournal)
    }
}

impl Default for Reconciler<NoJournal> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J: CommitJournal> Reconciler<J> {
    pub fn with_journal(journal: J) -> Self {
        Self::from_parts(StateStore::new(), journal)
    }

    /// Resume from a previously restored store
    pub fn from_parts(store: StateStore, journal: J) -> Self {
        Self { store, journal }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn into_parts(self) -> (StateStore, J) {
        (self.store, self.journal)
    }

    /// Compute the delta between `incoming` and the partition's committed state
    ///
    /// Relations bypass tracking entirely: every incoming record is returned
    /// as a create. For entities, every record is validated and fingerprinted
    /// before any output is produced, so an error never yields a partial delta.
    pub fn reconcile(
        &mut self,
        source: &SourceDescriptor,
        operation: &OperationDescriptor,
        incoming: Vec<Record>,
    ) -> Result<Delta, ReconcileError> {
        match operation.category {
            OperationCategory::AppendOnlyRelation => {
                tracing::debug!(
                    operation = %operation.name,
                    records = incoming.len(),
                    "relation snapshot passed through"
                );
                return Ok(Delta {
                    to_create: incoming,
                    ..Delta::default()
                });
            }
            OperationCategory::MutableEntity => {}
        }

        let key = PartitionKey::derive(source, operation)?;
        let fingerprints = fingerprint_snapshot(&incoming)?;

        // Work on a copy: committed state only ever changes in commit()
        let mut previous: PartitionState = self.store.get_or_create_partition(&key).clone();

        let mut to_create = Vec::new();
        let mut unchanged = 0;
        for (record, (external_id, fingerprint)) in incoming.into_iter().zip(fingerprints) {
            match previous.take(&external_id) {
                Some(committed) if committed == fingerprint => unchanged += 1,
                Some(_) | None => to_create.push(record),
            }
        }

        // Whatever was not accounted for has disappeared upstream
        let to_delete: Vec<Record> = previous.into_ids().map(Record::tombstone).collect();

        let delta = Delta {
            to_create,
            to_delete,
            unchanged,
        };
        tracing::debug!(partition = %key, summary = %delta.summary(), "reconciled");
        Ok(delta)
    }

    /// Advance the partition's committed state to reflect `delta`
    ///
    /// Call only after the downstream write of `delta` has succeeded. The
    /// commit is journaled before memory changes; if the journal fails,
    /// memory is left as it was.
    pub fn commit(
        &mut self,
        source: &SourceDescriptor,
        operation: &OperationDescriptor,
        delta: &Delta,
    ) -> Result<(), ReconcileError> {
        if !operation.category.tracks_state() {
            return Ok(());
        }

        let key = PartitionKey::derive(source, operation)?;
        let upserts = delta
            .to_create
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let entity = EntityRecord::try_from_record(record, position)?;
                Ok((entity.external_id().to_string(), entity.fingerprint()?))
            })
            .collect::<Result<BTreeMap<String, Fingerprint>, ReconcileError>>()?;
        let deletions = delta
            .to_delete
            .iter()
            .enumerate()
            .map(|(position, record)| {
                EntityRecord::try_from_record(record, position)
                    .map(|entity| entity.external_id().to_string())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let commit = CommitRecord {
            partition: key,
            upserts,
            deletions,
        };
        if !commit.is_empty() {
            self.journal.append(&commit)?;
        }

        tracing::debug!(
            partition = %commit.partition,
            upserts = commit.upserts.len(),
            deletions = commit.deletions.len(),
            "committed"
        );
        let CommitRecord {
            partition,
            upserts,
            deletions,
        } = commit;
        self.store.apply(&partition, upserts, deletions);
        Ok(())
    }
}

/// Validate and fingerprint every record of an entity snapshot
fn fingerprint_snapshot(records: &[Record]) -> Result<Vec<(String, Fingerprint)>, ReconcileError> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let entity = EntityRecord::try_from_record(record, position)?;
            if !seen.insert(entity.external_id()) {
                return Err(ReconcileError::DuplicateExternalId {
                    external_id: entity.external_id().to_string(),
                    position,
                });
            }
            Ok((entity.external_id().to_string(), entity.fingerprint()?))
        })
        .collect()
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
