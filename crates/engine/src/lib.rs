// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gsync engine: transforms, sync cycles, and manifest wiring

mod error;
mod synchronizer;
mod transform;
mod wiring;

pub use error::SyncError;
pub use synchronizer::{CycleReport, OperationReport, SyncDeps, Synchronizer};
pub use transform::{TransformError, Transformer};
pub use wiring::{
    configured, configured_readonly, open_reconciler, ConfiguredCredentials, ConfiguredJournal,
    ConfiguredSink, ConfiguredSynchronizer,
};
