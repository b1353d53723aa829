// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP source fetcher

use super::{FetchError, RecordFetcher};
use crate::http;
use async_trait::async_trait;
use gsync_core::SourceDescriptor;
use std::time::Duration;

/// GETs a JSON document, sending `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: http::agent(timeout),
        }
    }

    fn get(agent: &ureq::Agent, url: &str, token: Option<&str>) -> Result<String, FetchError> {
        let http_err = |e: ureq::Error| FetchError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let mut request = agent.get(url).header("Accept", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let mut response = request.call().map_err(http_err)?;
        http::read_body(&mut response).map_err(http_err)
    }
}

#[async_trait]
impl RecordFetcher for HttpFetcher {
    async fn fetch(
        &self,
        source: &SourceDescriptor,
        token: Option<&str>,
    ) -> Result<serde_json::Value, FetchError> {
        let agent = self.agent.clone();
        let url = source.location.clone();
        let token = token.map(str::to_string);
        let join_url = url.clone();

        let body = tokio::task::spawn_blocking(move || Self::get(&agent, &url, token.as_deref()))
            .await
            .map_err(|e| FetchError::Http {
                url: join_url,
                message: e.to_string(),
            })??;

        serde_json::from_str(&body).map_err(|e| FetchError::InvalidJson {
            location: source.location.clone(),
            message: e.to_string(),
        })
    }
}
