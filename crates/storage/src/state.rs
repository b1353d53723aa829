// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized reconciler state from WAL replay

use crate::wal::{CommitWal, WalEntry, WalError};
use gsync_core::StateStore;
use std::path::Path;

/// State rebuilt from a commit log
#[derive(Debug, Default)]
pub struct RestoredState {
    pub store: StateStore,
    /// Sequence of the last applied entry
    pub sequence: u64,
    /// Number of entries applied
    pub applied: usize,
}

impl RestoredState {
    /// Apply a journaled commit to the store
    pub fn apply(&mut self, entry: WalEntry) {
        let commit = entry.commit;
        self.store
            .apply(&commit.partition, commit.upserts, commit.deletions);
        self.sequence = entry.seq;
        self.applied += 1;
    }
}

/// Replay the log at `path` into a fresh store. A missing log yields an empty store.
pub fn restore_store(path: &Path) -> Result<RestoredState, WalError> {
    let mut state = RestoredState::default();
    for entry in CommitWal::replay(path)? {
        state.apply(entry);
    }
    tracing::info!(
        path = %path.display(),
        entries = state.applied,
        partitions = state.store.len(),
        "restored reconciler state"
    );
    Ok(state)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
