// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake credential provider for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CredentialError, CredentialProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Fake provider that counts requests and can be told to fail
#[derive(Clone, Default)]
pub struct FakeCredentials {
    token: Option<String>,
    requests: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl FakeCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Number of token requests made so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn token(&self) -> Result<Option<String>, CredentialError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CredentialError::Request("fake failure".to_string()));
        }
        Ok(self.token.clone())
    }
}
