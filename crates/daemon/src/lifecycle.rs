// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, cycles, shutdown.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use gsync_engine::{configured, ConfiguredSynchronizer, SyncError};
use gsync_manifest::{load_manifest, ManifestError};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{error, info, warn};

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical path of the manifest being synced
    pub manifest_path: PathBuf,
    /// Directory holding the lock and log for this manifest
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
}

impl Config {
    /// Create config for a manifest
    pub fn for_manifest(manifest_path: &Path) -> Result<Self, LifecycleError> {
        let canonical = manifest_path
            .canonicalize()
            .map_err(|e| LifecycleError::ManifestNotFound(manifest_path.to_path_buf(), e))?;

        let state_dir = match std::env::var("GSYNC_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => state_root()?.join(manifest_hash(&canonical)),
        };

        Ok(Self {
            manifest_path: canonical,
            lock_path: state_dir.join("gsyncd.pid"),
            log_path: state_dir.join("gsyncd.log"),
            state_dir,
        })
    }
}

/// Daemon state during operation
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Synchronizer built from the manifest
    pub synchronizer: ConfiguredSynchronizer,
    /// Time between cycles
    pub interval: Duration,
    /// Cycles attempted since startup
    pub cycles: u64,
    /// Consecutive failed cycles
    pub failures: u64,
    /// When daemon started
    pub start_time: Instant,
}

impl DaemonState {
    /// Run one sync cycle, logging its outcome
    ///
    /// A failed cycle leaves committed state untouched and is retried at the
    /// next tick, so errors are logged rather than returned.
    pub async fn run_cycle(&mut self) {
        self.cycles += 1;
        let start = Instant::now();
        match self.synchronizer.run_cycle().await {
            Ok(report) => {
                self.failures = 0;
                for op in &report.operations {
                    info!(
                        source = %op.source,
                        operation = %op.operation,
                        delta = %op.delta,
                        "operation synced"
                    );
                }
                info!(
                    cycle = self.cycles,
                    changes = report.changes(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "cycle succeeded"
                );
            }
            Err(e) => {
                self.failures += 1;
                error!(
                    cycle = self.cycles,
                    consecutive_failures = self.failures,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "cycle failed"
                );
            }
        }
    }

    /// Shutdown the daemon gracefully
    pub fn shutdown(&mut self) {
        info!(
            cycles = self.cycles,
            uptime_secs = self.start_time.elapsed().as_secs(),
            "Shutting down daemon..."
        );

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // Lock is released when self.lock_file is dropped
        info!("Daemon shutdown complete");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Manifest not found at {0}: {1}")]
    ManifestNotFound(PathBuf, std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Setup error: {0}")]
    Sync(#[from] SyncError),
}

/// Start the daemon
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config) {
        Ok(state) => Ok(state),
        Err(e) => {
            cleanup_on_failure(config, &e);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Create state directory
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST - prevents two daemons syncing one manifest
    // Open without truncating: a running daemon's PID must survive a failed attempt
    let mut lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    use std::io::Write;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 3. Load manifest and wire adapters (fail fast before the first cycle)
    let manifest = load_manifest(&config.manifest_path)?;
    let interval = manifest.sync.interval;
    info!(
        sources = manifest.sources.len(),
        operations = manifest.operations().count(),
        interval_secs = interval.as_secs(),
        journal = ?manifest.state.journal,
        "Loaded manifest"
    );

    // 4. Restore state and load templates
    let synchronizer = configured(manifest)?;

    info!(
        "Daemon started for manifest: {}",
        config.manifest_path.display()
    );

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        synchronizer,
        interval,
        cycles: 0,
        failures: 0,
        start_time: Instant::now(),
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config, error: &LifecycleError) {
    // Another daemon owns the PID file; leave it alone
    if matches!(error, LifecycleError::LockFailed(_)) {
        return;
    }
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

/// Get the state root for gsync
fn state_root() -> Result<PathBuf, LifecycleError> {
    // Use XDG_STATE_HOME or default to ~/.local/state
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("gsync"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/gsync"))
}

/// Compute manifest hash for a unique state directory
fn manifest_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let result = hasher.finalize();
    // First 8 bytes, 16 hex chars
    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
