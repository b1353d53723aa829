// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Building adapters and state from manifest sections

use crate::{SyncDeps, SyncError, Synchronizer};
use async_trait::async_trait;
use gsync_adapters::{
    CredentialError, CredentialProvider, CypherHttpSink, GraphSink, LogSink, NoCredentials,
    OAuthClientCredentials, OAuthSettings, SinkError, SourceFetcher, StaticToken, TracedFetcher,
    TracedSink, WriteSummary,
};
use gsync_core::{CommitJournal, Delta, NoJournal, OperationDescriptor, Reconciler, StateStore};
use gsync_manifest::{CredentialsDef, Manifest, SinkDef};
use gsync_storage::{restore_store, CommitWal, WalError};
use std::time::Duration;

/// Credential provider selected by `[credentials] kind`
#[derive(Clone)]
pub enum ConfiguredCredentials {
    None(NoCredentials),
    Static(StaticToken),
    OAuth(OAuthClientCredentials),
}

impl ConfiguredCredentials {
    pub fn from_def(def: &CredentialsDef, timeout: Duration) -> Self {
        match def {
            CredentialsDef::Disabled => Self::None(NoCredentials),
            CredentialsDef::Static { token } => Self::Static(StaticToken::new(token.clone())),
            CredentialsDef::Oauth {
                url,
                client_id,
                client_secret,
                audience,
            } => Self::OAuth(OAuthClientCredentials::new(
                OAuthSettings {
                    url: url.clone(),
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    audience: audience.clone(),
                },
                timeout,
            )),
        }
    }
}

#[async_trait]
impl CredentialProvider for ConfiguredCredentials {
    async fn token(&self) -> Result<Option<String>, CredentialError> {
        match self {
            Self::None(p) => p.token().await,
            Self::Static(p) => p.token().await,
            Self::OAuth(p) => p.token().await,
        }
    }
}

/// Graph sink selected by `[sink] kind`
#[derive(Clone)]
pub enum ConfiguredSink {
    CypherHttp(CypherHttpSink),
    Log(LogSink),
}

impl ConfiguredSink {
    pub fn from_def(def: &SinkDef, timeout: Duration) -> Self {
        match def {
            SinkDef::CypherHttp { url, authorization } => Self::CypherHttp(CypherHttpSink::new(
                url.clone(),
                authorization.clone(),
                timeout,
            )),
            SinkDef::Log => Self::Log(LogSink),
        }
    }
}

#[async_trait]
impl GraphSink for ConfiguredSink {
    async fn prepare(&self, ops: &[OperationDescriptor]) -> Result<(), SinkError> {
        match self {
            Self::CypherHttp(s) => s.prepare(ops).await,
            Self::Log(s) => s.prepare(ops).await,
        }
    }

    async fn write(
        &self,
        op: &OperationDescriptor,
        delta: &Delta,
    ) -> Result<WriteSummary, SinkError> {
        match self {
            Self::CypherHttp(s) => s.write(op, delta).await,
            Self::Log(s) => s.write(op, delta).await,
        }
    }
}

/// Journal selected by `[state] journal`
pub type ConfiguredJournal = Box<dyn CommitJournal>;

/// Reconciler for the manifest's state settings
///
/// With a journal configured, committed state is replayed from it and new
/// commits are appended to it. Without one, state starts empty and lives
/// only in memory.
pub fn open_reconciler(manifest: &Manifest) -> Result<Reconciler<ConfiguredJournal>, WalError> {
    let Some(path) = &manifest.state.journal else {
        return Ok(Reconciler::with_journal(
            Box::new(NoJournal) as ConfiguredJournal
        ));
    };
    let restored = restore_store(path)?;
    tracing::info!(
        journal = %path.display(),
        commits = restored.applied,
        partitions = restored.store.len(),
        "restored state"
    );
    let wal = CommitWal::open(path)?;
    Ok(Reconciler::from_parts(
        restored.store,
        Box::new(wal) as ConfiguredJournal,
    ))
}

/// Synchronizer built entirely from a manifest
pub type ConfiguredSynchronizer = Synchronizer<
    ConfiguredCredentials,
    TracedFetcher<SourceFetcher>,
    TracedSink<ConfiguredSink>,
    ConfiguredJournal,
>;

/// Wire credentials, fetchers, sink, and state as the manifest describes
pub fn configured(manifest: Manifest) -> Result<ConfiguredSynchronizer, SyncError> {
    let reconciler = open_reconciler(&manifest)?;
    assemble(manifest, reconciler)
}

/// Like [`configured`], but the journal is only read
///
/// Suited to dry runs: committed state is restored, and nothing is appended.
pub fn configured_readonly(manifest: Manifest) -> Result<ConfiguredSynchronizer, SyncError> {
    let store = match &manifest.state.journal {
        Some(path) => restore_store(path)?.store,
        None => StateStore::new(),
    };
    let reconciler = Reconciler::from_parts(store, Box::new(NoJournal) as ConfiguredJournal);
    assemble(manifest, reconciler)
}

fn assemble(
    manifest: Manifest,
    reconciler: Reconciler<ConfiguredJournal>,
) -> Result<ConfiguredSynchronizer, SyncError> {
    let timeout = manifest.sync.timeout;
    let deps = SyncDeps {
        credentials: ConfiguredCredentials::from_def(&manifest.credentials, timeout),
        fetcher: TracedFetcher::new(SourceFetcher::new(timeout)),
        sink: TracedSink::new(ConfiguredSink::from_def(&manifest.sink, timeout)),
    };
    Synchronizer::new(manifest, deps, reconciler)
}

#[cfg(test)]
#[path = "wiring_tests.rs"]
mod tests;
