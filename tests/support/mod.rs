//! Test support utilities for orgseal integration tests.
//!
//! Provides an isolated test environment and helper commands.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// No process-global state is mutated — child processes use
/// `.current_dir()` so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Write a manifest file into the test directory.
    pub fn write_manifest(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write manifest");
        path
    }

    /// Create an orgseal command rooted in the test directory.
    ///
    /// `GITHUB_TOKEN` is cleared so token-fallback behavior is
    /// deterministic regardless of the host environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("orgseal").expect("failed to find orgseal binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("GITHUB_TOKEN");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `orgseal check --offline`.
    pub fn check_offline(&self, manifest: &str) -> Output {
        self.cmd()
            .args(["check", manifest, "--offline"])
            .output()
            .expect("failed to run orgseal check")
    }

    /// Shortcut for `orgseal init`.
    pub fn init(&self, path: &str) -> Output {
        self.cmd()
            .args(["init", path])
            .output()
            .expect("failed to run orgseal init")
    }
}

/// Assert the command succeeded, printing stderr on failure.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Assert the command failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure, got success\nstdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

/// Assert stdout contains a substring.
pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(needle),
        "stdout missing '{}':\n{}",
        needle,
        stdout
    );
}

/// Assert stderr contains a substring.
pub fn assert_stderr_contains(output: &Output, needle: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(needle),
        "stderr missing '{}':\n{}",
        needle,
        stderr
    );
}
