// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Integration manifest parsing and definition

mod parser;
mod settings;
mod source;
mod template;
mod validate;

pub use parser::{load_manifest, parse_manifest, Manifest, ManifestError};
pub use settings::{CredentialsDef, SinkDef, StateSettings, SyncSettings};
pub use source::{OperationDef, SourceDef};
pub use template::interpolate_env;
pub use validate::is_identifier;
