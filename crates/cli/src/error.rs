// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use gsync_engine::SyncError;
use gsync_manifest::ManifestError;
use gsync_storage::WalError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl CliError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {}

/// Common error builders for typical failure scenarios.
impl CliError {
    /// The manifest could not be loaded or failed validation.
    pub fn manifest(path: &Path, error: &ManifestError) -> Self {
        let err = CliError::new(format!("Invalid manifest {}", path.display()))
            .with_context(error.to_string());
        match error {
            ManifestError::MissingEnv(_) => err
                .with_suggestion("Export the variables or add them to a .env file")
                .with_suggestion("Use ${VAR:-default} for optional values"),
            ManifestError::Io { .. } => {
                err.with_suggestion("Check the path, or run from the manifest's directory")
            }
            _ => err.with_suggestion(format!("Check the manifest: gsync validate {}", path.display())),
        }
    }

    /// A sync cycle (or dry run) stopped at an error.
    pub fn cycle(error: &SyncError) -> Self {
        let err = CliError::new("Sync cycle failed").with_context(error.to_string());
        match error {
            SyncError::Credentials(_) => {
                err.with_suggestion("Check the [credentials] section and its secrets")
            }
            SyncError::Fetch { .. } => err.with_suggestion("Check the source URL is reachable"),
            SyncError::Transform(_) => err
                .with_suggestion("Render the template against a saved response to debug it")
                .with_context("Templates must output a JSON array of objects"),
            SyncError::Sink { .. } | SyncError::Prepare(_) => err
                .with_context("Nothing was committed for the failed operation")
                .with_suggestion("Check the [sink] URL and authorization"),
            SyncError::NotConverged { .. } => err
                .with_context("The source returned records whose ids repeat or change between renders"),
            SyncError::Journal(WalError::Locked { .. }) => err
                .with_context("Another gsync process holds the journal")
                .with_suggestion("Stop gsyncd for this manifest, or wait for it to finish"),
            SyncError::Reconcile { .. } | SyncError::Journal(_) => err,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
