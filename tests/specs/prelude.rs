//! Shared fixtures for black-box specs

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};
use tempfile::TempDir;

/// One entity operation over a local JSON file, logged instead of written
pub const MINIMAL_MANIFEST: &str = r#"
[state]
journal = "state/commits.wal"

[[source]]
name = "local"
kind = "file"
url = "data/buckets.json"

[[source.operation]]
name = "buckets"
category = "entity"
params = ["bucket"]
transform = "transform/buckets.j2"
"#;

/// Adds a relation from each bucket to its owner
pub const OWNERSHIP_OPERATION: &str = r#"
[[source.operation]]
name = "owned_by"
category = "relation"
params = ["bucket", "owned_by", "team"]
transform = "transform/owned_by.j2"
"#;

pub const BUCKETS_TEMPLATE: &str = r#"[
{%- for b in buckets %}
  {"external_id": {{ b.slug | tojson }}, "updated_at": {{ b.updated_at | tojson }}}
  {%- if not loop.last %},{% endif %}
{%- endfor %}
]"#;

pub const OWNED_BY_TEMPLATE: &str = r#"[
{%- for b in buckets %}
  {"a_id": {{ b.slug | tojson }}, "b_id": {{ b.team | tojson }}}
  {%- if not loop.last %},{% endif %}
{%- endfor %}
]"#;

pub const TWO_BUCKETS: &str = r#"{"buckets": [
  {"slug": "web", "team": "edge", "updated_at": "2026-01-01"},
  {"slug": "api", "team": "core", "updated_at": "2026-01-01"}
]}"#;

/// A temporary project directory with its own state dir
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with [`MINIMAL_MANIFEST`], its template, and two buckets
    pub fn minimal() -> Self {
        let project = Self::empty();
        project.file("gsync.toml", MINIMAL_MANIFEST);
        project.file("transform/buckets.j2", BUCKETS_TEMPLATE);
        project.file("data/buckets.json", TWO_BUCKETS);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parents
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.dir.path().join(rel)).unwrap_or_default()
    }

    /// Directory gsyncd keeps its lock and log in
    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join(".gsyncd")
    }

    pub fn gsync(&self) -> CliBuilder {
        CliBuilder::new("gsync", self)
    }

    /// Spawn gsyncd and wait for it to report READY
    pub fn start_daemon(&self) -> Daemon {
        let mut child = self.daemon_command().stdout(Stdio::piped()).spawn().unwrap();
        let stdout = child.stdout.take().unwrap();
        let ready = BufReader::new(stdout)
            .lines()
            .map_while(Result::ok)
            .any(|line| line == "READY");
        assert!(ready, "gsyncd exited before READY");
        Daemon { child }
    }

    /// Run gsyncd to completion, for startups expected to fail
    pub fn daemon_output(&self) -> std::process::Output {
        self.daemon_command().output().unwrap()
    }

    fn daemon_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("gsyncd"));
        cmd.current_dir(self.path())
            .arg("gsync.toml")
            .env("GSYNC_STATE_DIR", self.state_path())
            .env_remove("RUST_LOG")
            .stderr(Stdio::null());
        cmd
    }
}

/// A running gsyncd, killed on drop
pub struct Daemon {
    child: Child,
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    fn new(bin: &str, project: &Project) -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin(bin).unwrap();
        cmd.current_dir(project.path()).env_remove("RUST_LOG");
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(
            run.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(
            !run.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }
}

pub struct RunAssert {
    success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(
            self.stdout.contains(expected),
            "stdout missing {:?}:\n{}",
            expected,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        assert!(
            !self.stdout.contains(unexpected),
            "stdout unexpectedly has {:?}:\n{}",
            unexpected,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        assert!(
            self.stderr.contains(expected),
            "stderr missing {:?}:\n{}",
            expected,
            self.stderr
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
