//! Isolated test environment with a temporary nest file.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::NstCommand;

/// A temporary directory holding one nest file, cleaned up on drop.
pub struct TestEnv {
    temp: TempDir,
    nest: PathBuf,
}

impl TestEnv {
    /// Creates a fresh environment and initializes its nest file.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nest = temp.path().join("test.nest");

        let env = Self { temp, nest };
        env.cmd().args(["init"]).assert().success();
        env
    }

    /// Creates an environment without initializing the nest file.
    pub fn uninitialized() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nest = temp.path().join("test.nest");
        Self { temp, nest }
    }

    /// Path to the nest file.
    pub fn nest_path(&self) -> &Path {
        &self.nest
    }

    /// Path to the temp directory, for scratch output files.
    pub fn dir(&self) -> &Path {
        self.temp.path()
    }

    /// Returns a command builder pointed at this environment's nest file.
    pub fn cmd(&self) -> NstCommand {
        NstCommand::new().nest(&self.nest)
    }

    /// Creates a note with the given content and returns its blob hash.
    pub fn add_note(&self, content: &str) -> String {
        let out = self.cmd().args(["new", "-m", content]).output_success();
        out.trim().to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
