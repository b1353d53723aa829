// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod once;
pub mod plan;
pub mod validate;

use crate::error::CliError;
use gsync_manifest::{load_manifest, Manifest};
use std::path::Path;

/// Load a manifest, turning failures into a user-facing error
pub fn manifest(path: &Path) -> Result<Manifest, CliError> {
    load_manifest(path).map_err(|e| CliError::manifest(path, &e))
}
