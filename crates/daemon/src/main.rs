// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gsync daemon (gsyncd)
//!
//! Background process that syncs one manifest on a fixed interval.
//! Usage: `gsyncd [MANIFEST]`, defaulting to `gsync.toml`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;

use std::path::{Path, PathBuf};

use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::lifecycle::{Config, DaemonState, LifecycleError};

/// Prefix of the first line each daemon run appends to its log
///
/// Full line: "--- gsyncd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- gsyncd: starting (pid: ";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("gsync.toml"), PathBuf::from);

    // Secrets referenced as ${VAR} may live in a .env next to the manifest
    load_env(&manifest_path);

    let config = Config::for_manifest(&manifest_path)?;
    std::fs::create_dir_all(&config.state_dir)?;

    // Marker goes in before the subscriber so every run starts on it
    append_log_line(
        &config,
        &format!("{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id()),
    )?;
    let log_guard = init_tracing(&config)?;

    info!(manifest = %config.manifest_path.display(), "gsyncd starting");

    let daemon = match lifecycle::startup(&config) {
        Ok(daemon) => daemon,
        Err(e) => {
            // The non-blocking writer may drop this on exit; write it directly too
            let _ = append_log_line(&config, &format!("ERROR Failed to start daemon: {}", e));
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    serve(daemon).await?;
    info!("Daemon stopped");
    Ok(())
}

/// Run cycles on the manifest's interval until SIGTERM or SIGINT
async fn serve(mut daemon: DaemonState) -> std::io::Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    // First tick fires immediately; a slow cycle delays the next rather than bunching
    let mut ticker = tokio::time::interval(daemon.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Daemon ready, syncing every {}s",
        daemon.interval.as_secs()
    );
    // Parent processes and scripts wait for this line
    println!("READY");

    let signal_name = loop {
        tokio::select! {
            _ = ticker.tick() => daemon.run_cycle().await,
            _ = terminate.recv() => break "SIGTERM",
            _ = interrupt.recv() => break "SIGINT",
        }
    };

    info!(signal = signal_name, "shutting down");
    daemon.shutdown();
    Ok(())
}

/// Load `.env` from the working directory, then from the manifest's directory
///
/// Variables already set are never overridden.
fn load_env(manifest_path: &Path) {
    let _ = dotenvy::dotenv();
    if let Some(dir) = manifest_path.parent() {
        let _ = dotenvy::from_path(dir.join(".env"));
    }
}

/// Append one line to the log file, bypassing tracing
fn append_log_line(config: &Config, line: &str) -> Result<(), LifecycleError> {
    use std::io::Write;

    let mut log = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    writeln!(log, "{}", line)?;
    Ok(())
}

fn init_tracing(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = config.log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    let file_name = config
        .log_path
        .file_name()
        .ok_or(LifecycleError::NoStateDir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Ok(guard)
}
