//! Test support utilities for secretrun integration tests.
//!
//! Provides recording test doubles for the orchestrator's collaborators and
//! helpers for driving the binary.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod doubles;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use doubles::*;

use tempfile::TempDir;

/// Test environment for binary tests.
///
/// Each test gets its own temporary working and config directory. No
/// process-global state is mutated, so tests can run in parallel.
pub struct Test {
    /// Working directory for the child command
    pub dir: TempDir,
    /// Directory standing in for the user's config dir
    pub config_home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let config_home = TempDir::new().expect("failed to create temp config dir");

        Self { dir, config_home }
    }

    /// Write a config file into the test dir and return its path.
    pub fn config_file(&self, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join("secretrun.toml");
        std::fs::write(&path, contents).expect("failed to write config file");
        path
    }
}
