//! Common test utilities shared across integration tests.
//!
//! Clippy cannot track usage across integration test files,
//! hence the `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_SESSION: &str = r#"{"parlSession":{"title":"T","date":"D"},"statementCount":1,"personCount":2,"sessionStatements":[{"position":"Chair","title":"Jane Doe","paragraphs":["Hello","World"]}]}"#;

pub const SAMPLE_TEXT: &str = "Session Title: T\nDate: D\nTotal Statements: 1\nTotal Participants: 2\n\nChair (ID: Jane Doe):\nHello World\n\n";

/// Isolated working directory; every command runs with it as cwd.
pub struct TestFixture {
    temp_dir: TempDir,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("steno");
        cmd.current_dir(self.root())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.path("steno.toml"))
            .arg("--format")
            .arg("plain");
        cmd
    }
}
