//! Daemon lifecycle specs
//!
//! Verify gsyncd startup, locking, and its first cycle.

use crate::prelude::*;

fn wait_for(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    false
}

#[test]
fn daemon_reports_ready_and_writes_pid() {
    let temp = Project::minimal();
    let _daemon = temp.start_daemon();

    let pid = temp.read(".gsyncd/gsyncd.pid");
    assert!(pid.trim().parse::<u32>().is_ok(), "pid file: {pid:?}");
}

#[test]
fn daemon_runs_a_cycle_at_startup() {
    let temp = Project::minimal();
    let _daemon = temp.start_daemon();

    assert!(
        wait_for(|| !temp.read("state/commits.wal").is_empty()),
        "no commit journaled:\n{}",
        temp.read(".gsyncd/gsyncd.log")
    );
}

#[test]
fn daemon_logs_startup_marker() {
    let temp = Project::minimal();
    let _daemon = temp.start_daemon();

    assert!(wait_for(|| temp
        .read(".gsyncd/gsyncd.log")
        .contains("Daemon ready")));
    assert!(temp
        .read(".gsyncd/gsyncd.log")
        .contains("--- gsyncd: starting (pid: "));
}

#[test]
fn second_daemon_for_same_state_fails() {
    let temp = Project::minimal();
    let _daemon = temp.start_daemon();
    let pid = temp.read(".gsyncd/gsyncd.pid");

    let output = temp.daemon_output();
    assert!(!output.status.success());
    assert!(temp.read(".gsyncd/gsyncd.log").contains("daemon already running"));
    assert_eq!(temp.read(".gsyncd/gsyncd.pid"), pid);
}

#[test]
fn daemon_without_manifest_fails() {
    let temp = Project::empty();

    let output = temp.daemon_output();
    assert!(!output.status.success());
}

#[test]
fn once_is_refused_while_daemon_holds_journal() {
    let temp = Project::minimal();
    let _daemon = temp.start_daemon();
    assert!(wait_for(|| !temp.read("state/commits.wal").is_empty()));
    let journal = temp.read("state/commits.wal");

    temp.gsync()
        .args(&["once"])
        .fails()
        .stderr_has("in use by another process")
        .stderr_has("Stop gsyncd");

    // Dry runs only read the journal
    temp.gsync()
        .args(&["plan"])
        .passes()
        .stdout_has("0 to create, 0 to delete, 2 unchanged");
    assert_eq!(temp.read("state/commits.wal"), journal);
}
