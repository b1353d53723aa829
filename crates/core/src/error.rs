// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for reconciliation

use crate::journal::JournalError;
use crate::partition::IdentityError;
use thiserror::Error;

/// Errors from reconcile or commit. None of them leave partial state behind.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),
    #[error("record {position} is missing text field '{field}'")]
    MissingField { field: &'static str, position: usize },
    #[error("record {position} repeats external_id '{external_id}'")]
    DuplicateExternalId { external_id: String, position: usize },
    #[error("failed to serialize record for fingerprinting: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
}
