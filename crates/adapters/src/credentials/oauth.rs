// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OAuth2 client-credentials grant

use super::{CredentialError, CredentialProvider};
use crate::http;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Settings for the client-credentials token request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthSettings {
    pub url: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: Option<String>,
}

/// Requests a fresh token from an OAuth2 token endpoint
#[derive(Clone)]
pub struct OAuthClientCredentials {
    settings: Arc<OAuthSettings>,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl OAuthClientCredentials {
    pub fn new(settings: OAuthSettings, timeout: Duration) -> Self {
        Self {
            settings: Arc::new(settings),
            agent: http::agent(timeout),
        }
    }

    fn request(agent: &ureq::Agent, settings: &OAuthSettings) -> Result<String, CredentialError> {
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", settings.client_id.as_str()),
            ("client_secret", settings.client_secret.as_str()),
        ];
        if let Some(audience) = &settings.audience {
            form.push(("audience", audience.as_str()));
        }

        let mut response = agent
            .post(settings.url.as_str())
            .send_form(form)
            .map_err(|e| CredentialError::Request(e.to_string()))?;
        let body =
            http::read_body(&mut response).map_err(|e| CredentialError::Request(e.to_string()))?;
        parse_token(&body)
    }
}

/// Pull `access_token` out of a token endpoint response
pub(crate) fn parse_token(body: &str) -> Result<String, CredentialError> {
    let parsed: TokenResponse = serde_json::from_str(body)
        .map_err(|e| CredentialError::InvalidResponse(e.to_string()))?;
    match parsed.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(CredentialError::InvalidResponse(
            "missing access_token".to_string(),
        )),
    }
}

#[async_trait]
impl CredentialProvider for OAuthClientCredentials {
    async fn token(&self) -> Result<Option<String>, CredentialError> {
        let agent = self.agent.clone();
        let settings = Arc::clone(&self.settings);
        let token = http::run_blocking(
            move || Self::request(&agent, &settings),
            CredentialError::Request,
        )
        .await?;
        Ok(Some(token))
    }
}

#[cfg(test)]
#[path = "oauth_tests.rs"]
mod tests;
