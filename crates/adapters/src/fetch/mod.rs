// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetching raw source documents

mod file;
mod http;

pub use file::FileFetcher;
pub use http::HttpFetcher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFetcher, FetchCall};

use async_trait::async_trait;
use gsync_core::{IdentityError, SourceDescriptor, SourceKind};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from fetching a source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{location} did not return JSON: {message}")]
    InvalidJson { location: String, message: String },
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error("source {0} is not configured")]
    Unknown(String),
}

/// Pulls the current document for a source
#[async_trait]
pub trait RecordFetcher: Clone + Send + Sync + 'static {
    /// Fetch the source's JSON document, authenticating with `token` if given
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        token: Option<&str>,
    ) -> Result<serde_json::Value, FetchError>;
}

/// Fetcher that dispatches on the source kind
#[derive(Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: HttpFetcher::new(timeout),
            file: FileFetcher,
        }
    }
}

#[async_trait]
impl RecordFetcher for SourceFetcher {
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        token: Option<&str>,
    ) -> Result<serde_json::Value, FetchError> {
        match source.source_kind()? {
            SourceKind::Http => self.http.fetch(source, token).await,
            SourceKind::File => self.file.fetch(source, token).await,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
