// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync cycle orchestration
//!
//! One cycle takes a token, then walks the manifest's sources in order.
//! Each source is fetched once; each of its operations is transformed,
//! reconciled, written, and committed before the next operation starts,
//! because relation operations match nodes written by earlier ones. The
//! first failure ends the cycle. Operations already committed stay
//! committed; the failed one and everything after it retry next cycle.

use crate::error::SyncError;
use crate::transform::Transformer;
use gsync_adapters::{CredentialProvider, GraphSink, RecordFetcher, WriteSummary};
use gsync_core::{
    CommitJournal, DeltaSummary, NoJournal, OperationCategory, OperationDescriptor, Reconciler,
};
use gsync_manifest::Manifest;
use serde::Serialize;
use tracing::Instrument;

/// Adapter dependencies for a synchronizer
pub struct SyncDeps<C, F, S> {
    pub credentials: C,
    pub fetcher: F,
    pub sink: S,
}

/// Outcome of one operation within a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub source: String,
    pub operation: String,
    pub category: OperationCategory,
    pub delta: DeltaSummary,
    /// `None` for dry runs
    pub written: Option<WriteSummary>,
}

/// Outcome of a cycle, one entry per operation in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub operations: Vec<OperationReport>,
}

impl CycleReport {
    /// Total records created and deleted across operations
    pub fn changes(&self) -> usize {
        self.operations
            .iter()
            .map(|op| op.delta.created + op.delta.deleted)
            .sum()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Apply,
    Plan,
}

/// Runs sync cycles for one manifest
pub struct Synchronizer<C, F, S, J = NoJournal> {
    manifest: Manifest,
    deps: SyncDeps<C, F, S>,
    transformer: Transformer,
    reconciler: Reconciler<J>,
    prepared: bool,
}

impl<C, F, S, J> Synchronizer<C, F, S, J>
where
    C: CredentialProvider,
    F: RecordFetcher,
    S: GraphSink,
    J: CommitJournal,
{
    /// Create a synchronizer, loading every operation's template
    pub fn new(
        manifest: Manifest,
        deps: SyncDeps<C, F, S>,
        reconciler: Reconciler<J>,
    ) -> Result<Self, SyncError> {
        let mut transformer = Transformer::new();
        for (_, op) in manifest.operations() {
            transformer.load(&op.transform)?;
        }
        Ok(Self {
            manifest,
            deps,
            transformer,
            reconciler,
            prepared: false,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn reconciler(&self) -> &Reconciler<J> {
        &self.reconciler
    }

    pub fn deps(&self) -> &SyncDeps<C, F, S> {
        &self.deps
    }

    /// Run one full cycle: fetch, transform, reconcile, write, commit
    pub async fn run_cycle(&mut self) -> Result<CycleReport, SyncError> {
        if !self.prepared {
            let ops: Vec<OperationDescriptor> = self
                .manifest
                .operations()
                .map(|(_, op)| op.descriptor())
                .collect();
            self.deps
                .sink
                .prepare(&ops)
                .await
                .map_err(SyncError::Prepare)?;
            self.prepared = true;
        }
        self.cycle(Mode::Apply).await
    }

    /// Compute every operation's delta without writing or committing
    pub async fn plan(&mut self) -> Result<CycleReport, SyncError> {
        self.cycle(Mode::Plan).await
    }

    async fn cycle(&mut self, mode: Mode) -> Result<CycleReport, SyncError> {
        let Self {
            manifest,
            deps,
            transformer,
            reconciler,
            ..
        } = self;
        let verify = manifest.sync.verify_commit;

        let token = deps.credentials.token().await?;
        let mut report = CycleReport::default();

        for source_def in &manifest.sources {
            let source = source_def.descriptor();
            let span = tracing::info_span!("sync.source", source = %source.name);

            async {
                let document = deps
                    .fetcher
                    .fetch(&source, token.as_deref())
                    .await
                    .map_err(|e| SyncError::Fetch {
                        source_name: source.name.clone(),
                        source: e,
                    })?;

                for op_def in &source_def.operations {
                    let op = op_def.descriptor();
                    let reconcile_err = |e| SyncError::Reconcile {
                        operation: op.name.clone(),
                        source: e,
                    };

                    let records = transformer.render(&op_def.transform, &document)?;
                    let check = (mode == Mode::Apply && verify && op.category.tracks_state())
                        .then(|| records.clone());

                    let delta = reconciler
                        .reconcile(&source, &op, records)
                        .map_err(reconcile_err)?;
                    let summary = delta.summary();
                    tracing::info!(operation = %op.name, %summary, "reconciled");

                    let written = match mode {
                        Mode::Plan => None,
                        Mode::Apply => {
                            let written = deps.sink.write(&op, &delta).await.map_err(|e| {
                                SyncError::Sink {
                                    operation: op.name.clone(),
                                    source: e,
                                }
                            })?;
                            reconciler
                                .commit(&source, &op, &delta)
                                .map_err(reconcile_err)?;

                            if let Some(records) = check {
                                let residue = reconciler
                                    .reconcile(&source, &op, records)
                                    .map_err(reconcile_err)?;
                                if !residue.is_empty() {
                                    return Err(SyncError::NotConverged {
                                        operation: op.name.clone(),
                                        summary: residue.summary(),
                                    });
                                }
                            }
                            Some(written)
                        }
                    };

                    report.operations.push(OperationReport {
                        source: source.name.clone(),
                        operation: op.name.clone(),
                        category: op.category,
                        delta: summary,
                        written,
                    });
                }
                Ok::<(), SyncError>(())
            }
            .instrument(span)
            .await?;
        }

        tracing::info!(
            operations = report.operations.len(),
            changes = report.changes(),
            "cycle complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "synchronizer_tests.rs"]
mod tests;
