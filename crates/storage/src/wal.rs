// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of reconciler commits
//!
//! One JSON line per commit. Each entry carries a sequence number and a
//! CRC32 of its serialized commit. A damaged final line (crash during
//! append) is dropped on replay; damage anywhere else is an error.
//!
//! An open `CommitWal` holds an exclusive lock on its file, so only one
//! process appends to a journal at a time. Replay takes no lock.

use fs2::FileExt;
use gsync_core::{CommitJournal, CommitRecord, JournalError};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt WAL entry at line {line}: {reason}")]
    Corrupt { line: u64, reason: String },
    #[error("journal {} is in use by another process", path.display())]
    Locked {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<WalError> for JournalError {
    fn from(err: WalError) -> Self {
        match err {
            WalError::Io(e) => JournalError::Io(e),
            WalError::Json(e) => JournalError::Json(e),
            WalError::Corrupt { line, reason } => JournalError::Corrupt {
                sequence: line,
                reason,
            },
            WalError::Locked { source, .. } => JournalError::Io(source),
        }
    }
}

/// A single journaled commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub commit: CommitRecord,
    /// CRC32 of the serialized commit
    pub checksum: u32,
}

impl WalEntry {
    pub fn new(seq: u64, commit: CommitRecord) -> Result<Self, WalError> {
        let checksum = checksum(&commit)?;
        Ok(Self {
            seq,
            commit,
            checksum,
        })
    }

    /// Check the stored checksum against the commit
    pub fn verify(&self) -> bool {
        checksum(&self.commit).is_ok_and(|sum| sum == self.checksum)
    }
}

fn checksum(commit: &CommitRecord) -> Result<u32, WalError> {
    let json = serde_json::to_vec(commit)?;
    Ok(crc32fast::hash(&json))
}

/// Append-only commit log
pub struct CommitWal {
    path: PathBuf,
    file: File,
    sequence: u64,
}

impl CommitWal {
    /// Open or create a WAL at the given path
    pub fn open(path: &Path) -> Result<Self, WalError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;
        // Held until drop; scanning and truncating happen under the lock
        file.try_lock_exclusive().map_err(|source| WalError::Locked {
            path: path.to_path_buf(),
            source,
        })?;

        // Continue numbering after the last valid entry
        let (entries, valid_len) = scan(path)?;
        let sequence = entries.last().map_or(0, |entry| entry.seq);

        // Cut off a torn tail so new entries follow the last valid one
        if file.metadata()?.len() > valid_len {
            file.set_len(valid_len)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            sequence,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a commit and fsync before returning
    pub fn append(&mut self, commit: &CommitRecord) -> Result<u64, WalError> {
        let entry = WalEntry::new(self.sequence + 1, commit.clone())?;
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        self.sequence = entry.seq;
        Ok(self.sequence)
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all valid entries from the log
    pub fn replay(path: &Path) -> Result<Vec<WalEntry>, WalError> {
        Ok(scan(path)?.0)
    }
}

/// Read every entry, returning them with the byte length of the valid prefix
fn scan(path: &Path) -> Result<(Vec<WalEntry>, u64), WalError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((Vec::new(), 0)),
        Err(e) => return Err(e.into()),
    };

    let mut reader = BufReader::new(file);
    let mut entries = Vec::new();
    let mut valid_len = 0u64;
    let mut offset = 0u64;
    let mut line_no = 0u64;
    let mut pending: Option<(u64, String)> = None;
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        offset += read as u64;

        if line.trim().is_empty() {
            continue;
        }
        // A bad line followed by more data is corruption, not a torn write
        if let Some((bad_line, reason)) = pending.take() {
            return Err(WalError::Corrupt {
                line: bad_line,
                reason,
            });
        }
        match parse_line(line.trim_end()) {
            Ok(entry) => {
                entries.push(entry);
                valid_len = offset;
            }
            Err(reason) => pending = Some((line_no, reason)),
        }
    }

    if let Some((bad_line, reason)) = pending {
        tracing::warn!(line = bad_line, reason = %reason, "dropping torn WAL tail");
    }
    Ok((entries, valid_len))
}

fn parse_line(line: &str) -> Result<WalEntry, String> {
    let entry: WalEntry = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if !entry.verify() {
        return Err(format!("checksum mismatch for seq {}", entry.seq));
    }
    Ok(entry)
}

impl CommitJournal for CommitWal {
    fn append(&mut self, commit: &CommitRecord) -> Result<(), JournalError> {
        let seq = CommitWal::append(self, commit)?;
        tracing::trace!(seq, partition = %commit.partition, "journaled commit");
        Ok(())
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
