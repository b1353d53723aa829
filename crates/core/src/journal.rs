// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commit journal seam
//!
//! The reconciler hands every commit to a [`CommitJournal`] before it
//! touches the in-memory store. The default [`NoJournal`] keeps state in
//! memory only, so a restart means a full resync.

use crate::fingerprint::Fingerprint;
use crate::partition::PartitionKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;

/// Errors recording a commit
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("journal corrupt at entry {sequence}: {reason}")]
    Corrupt { sequence: u64, reason: String },
}

/// One committed change to a partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub partition: PartitionKey,
    pub upserts: BTreeMap<String, Fingerprint>,
    pub deletions: Vec<String>,
}

impl CommitRecord {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletions.is_empty()
    }
}

/// Durable sink for commits
pub trait CommitJournal: Send {
    /// Record a commit. Must not return until the commit is durable.
    fn append(&mut self, commit: &CommitRecord) -> Result<(), JournalError>;
}

/// Journal that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJournal;

impl CommitJournal for NoJournal {
    fn append(&mut self, _commit: &CommitRecord) -> Result<(), JournalError> {
        Ok(())
    }
}

impl<J: CommitJournal + ?Sized> CommitJournal for Box<J> {
    fn append(&mut self, commit: &CommitRecord) -> Result<(), JournalError> {
        (**self).append(commit)
    }
}
