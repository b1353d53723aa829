// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fetcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FetchError, RecordFetcher};
use async_trait::async_trait;
use gsync_core::SourceDescriptor;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded fetch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub source: String,
    pub token: Option<String>,
}

/// Serves documents registered per source name
#[derive(Clone, Default)]
pub struct FakeFetcher {
    documents: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    calls: Arc<Mutex<Vec<FetchCall>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document served for `source`, replacing any previous one
    pub fn set_document(&self, source: &str, document: serde_json::Value) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(source.to_string(), document);
    }

    /// Stop serving `source`; later fetches fail
    pub fn remove_document(&self, source: &str) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(source);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl RecordFetcher for FakeFetcher {
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        token: Option<&str>,
    ) -> Result<serde_json::Value, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(FetchCall {
                source: source.name.clone(),
                token: token.map(str::to_string),
            });

        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&source.name)
            .cloned()
            .ok_or_else(|| FetchError::Unknown(source.name.clone()))
    }
}
