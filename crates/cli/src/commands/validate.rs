// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gsync validate` - Check a manifest without contacting anything

use anyhow::Result;
use clap::Args;
use gsync_manifest::{CredentialsDef, Manifest, SinkDef};
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Manifest to check
    #[arg(default_value = "gsync.toml")]
    pub manifest: PathBuf,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let manifest = super::manifest(&args.manifest)?;
    print!("{}", summary(&manifest));
    Ok(())
}

fn summary(manifest: &Manifest) -> String {
    let mut out = format!(
        "Manifest OK: {} sources, {} operations\n",
        manifest.sources.len(),
        manifest.operations().count()
    );
    for (source, op) in manifest.operations() {
        out.push_str(&format!(
            "  {}/{} ({}) [{}]\n",
            source.name,
            op.name,
            op.category,
            op.params.join(", ")
        ));
    }
    let credentials = match manifest.credentials {
        CredentialsDef::Disabled => "none",
        CredentialsDef::Static { .. } => "static",
        CredentialsDef::Oauth { .. } => "oauth",
    };
    let sink = match manifest.sink {
        SinkDef::CypherHttp { .. } => "cypher-http",
        SinkDef::Log => "log",
    };
    let journal = manifest
        .state
        .journal
        .as_ref()
        .map_or_else(|| "none".to_string(), |p| p.display().to_string());
    out.push_str(&format!(
        "credentials: {}, sink: {}, journal: {}\n",
        credentials, sink, journal
    ));
    out
}
