// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local JSON file fetcher

use super::{FetchError, RecordFetcher};
use async_trait::async_trait;
use gsync_core::SourceDescriptor;
use std::path::PathBuf;

/// Reads the source location as a path to a JSON file
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

#[async_trait]
impl RecordFetcher for FileFetcher {
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        _token: Option<&str>,
    ) -> Result<serde_json::Value, FetchError> {
        let path = PathBuf::from(&source.location);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })?;

        serde_json::from_str(&content).map_err(|e| FetchError::InvalidJson {
            location: source.location.clone(),
            message: e.to_string(),
        })
    }
}
