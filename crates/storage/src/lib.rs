// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable commit journal for the reconciler
//!
//! ```text
//! Reconciler::commit → CommitWal::append → disk (commits.wal)
//!                                              ↓
//!                       restore_store ← CommitWal::replay
//! ```

mod state;
mod wal;

pub use state::{restore_store, RestoredState};
pub use wal::{CommitWal, WalEntry, WalError};
