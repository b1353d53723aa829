// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gsync once` - Run a single sync cycle

use crate::error::CliError;
use crate::output::{self, OutputFormat, ReportView};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct OnceArgs {
    /// Manifest to sync
    #[arg(default_value = "gsync.toml")]
    pub manifest: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub async fn once(args: OnceArgs) -> Result<()> {
    let manifest = super::manifest(&args.manifest)?;
    let mut sync = gsync_engine::configured(manifest).map_err(|e| CliError::cycle(&e))?;
    let report = sync.run_cycle().await.map_err(|e| CliError::cycle(&e))?;
    output::print(&ReportView(&report), args.format);
    Ok(())
}
