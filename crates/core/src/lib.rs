// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gsync-core: reconciliation engine for graph synchronization
//!
//! This crate provides:
//! - Typed records with a guaranteed `external_id` for tracked entities
//! - Content fingerprints used for change detection
//! - Partition identity and the in-memory partitioned state store
//! - The reconciler (pure delta computation) and the commit protocol
//! - A journal seam for optionally persisting commits

pub mod error;
pub mod fingerprint;
pub mod journal;
pub mod partition;
pub mod reconciler;
pub mod record;
pub mod state;

// Re-exports
pub use error::ReconcileError;
pub use fingerprint::{fingerprint, Fingerprint};
pub use journal::{CommitJournal, CommitRecord, JournalError, NoJournal};
pub use partition::{
    IdentityError, OperationCategory, OperationDescriptor, PartitionKey, SourceDescriptor,
    SourceKind,
};
pub use reconciler::{Delta, DeltaSummary, Reconciler};
pub use record::{EntityRecord, Record, EXTERNAL_ID};
pub use state::{PartitionState, StateStore};
