// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access-token providers for source APIs

mod oauth;

pub use oauth::{OAuthClientCredentials, OAuthSettings};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCredentials;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from credential acquisition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("token request failed: {0}")]
    Request(String),
    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

/// Supplies the bearer token attached to source requests
#[async_trait]
pub trait CredentialProvider: Clone + Send + Sync + 'static {
    /// Acquire a token; `None` means requests go out unauthenticated
    async fn token(&self) -> Result<Option<String>, CredentialError>;
}

/// Provider for sources that need no authentication
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCredentials;

#[async_trait]
impl CredentialProvider for NoCredentials {
    async fn token(&self) -> Result<Option<String>, CredentialError> {
        Ok(None)
    }
}

/// Provider that hands out a fixed token
#[derive(Clone, Debug)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Result<Option<String>, CredentialError> {
        Ok(Some(self.token.clone()))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
