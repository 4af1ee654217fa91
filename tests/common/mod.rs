//! Common test utilities for tiller integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's data directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates a temporary data directory; the `tl()` method
/// returns a `Command` that sets `TL_DATA_DIR` per-invocation, making tests
/// parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated data directory.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the tl binary with isolated data directory.
    ///
    /// Sets `TL_DATA_DIR` per-command for parallel safety.
    pub fn tl(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tl"));
        cmd.env("TL_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// Get the path to the task slot file.
    pub fn slot_path(&self) -> std::path::PathBuf {
        self.data_dir.path().join("todos-v1.json")
    }

    /// Add a task and return its id, parsed from the JSON output.
    pub fn add(&self, text: &str) -> String {
        let output = self.tl().args(["add", text]).output().unwrap();
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        value["id"].as_str().unwrap().to_string()
    }

    /// List tasks and return the parsed JSON output.
    pub fn list_json(&self) -> serde_json::Value {
        let output = self.tl().arg("list").output().unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
