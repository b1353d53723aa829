// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global manifest sections: sync cadence, state, credentials, sink

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

fn default_interval() -> Duration {
    Duration::from_secs(300)
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

/// The `[sync]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSettings {
    /// Time between daemon cycles
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    /// Re-reconcile after each commit and fail unless the delta is empty
    #[serde(default = "default_true")]
    pub verify_commit: bool,
    /// Timeout applied to every outbound HTTP call
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            verify_commit: true,
            timeout: default_timeout(),
        }
    }
}

/// The `[state]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSettings {
    /// Commit journal location; state is in-memory only when absent
    #[serde(default)]
    pub journal: Option<PathBuf>,
}

/// The `[credentials]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum CredentialsDef {
    /// Requests go out without an Authorization header
    #[default]
    #[serde(rename = "none")]
    Disabled,
    /// A fixed bearer token
    Static { token: String },
    /// OAuth2 client-credentials grant
    Oauth {
        url: String,
        client_id: String,
        client_secret: String,
        #[serde(default)]
        audience: Option<String>,
    },
}

/// The `[sink]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum SinkDef {
    /// Neo4j-style transactional HTTP endpoint
    CypherHttp {
        url: String,
        /// Full `Authorization` header value, e.g. `Basic bmVvNGo6c2VjcmV0`
        #[serde(default)]
        authorization: Option<String>,
    },
    /// Log writes instead of sending them anywhere
    #[default]
    Log,
}
