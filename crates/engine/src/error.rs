// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the synchronizer

use crate::TransformError;
use gsync_adapters::{CredentialError, FetchError, SinkError};
use gsync_core::{DeltaSummary, ReconcileError};
use gsync_storage::WalError;
use thiserror::Error;

/// Errors that abort a sync cycle
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("credentials: {0}")]
    Credentials(#[from] CredentialError),
    #[error("fetching {source_name}: {source}")]
    Fetch {
        source_name: String,
        source: FetchError,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("reconciling {operation}: {source}")]
    Reconcile {
        operation: String,
        source: ReconcileError,
    },
    #[error("writing {operation}: {source}")]
    Sink {
        operation: String,
        source: SinkError,
    },
    #[error("preparing sink: {0}")]
    Prepare(SinkError),
    #[error("commit failed: {operation} still has {summary} after commit")]
    NotConverged {
        operation: String,
        summary: DeltaSummary,
    },
    #[error("commit journal: {0}")]
    Journal(#[from] WalError),
}
