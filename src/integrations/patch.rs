#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::git::ExecOutput;

/// Interface for the plain `patch` utility fallback
pub trait PatchTool {
    /// Apply a patch file to the working tree with strip level 1
    fn apply(&self, patch: &Path) -> Result<ExecOutput>;
}

/// Real `patch` implementation, executed in a fixed working directory
#[derive(Debug)]
pub struct RealPatchTool {
    working_dir: PathBuf,
}

impl RealPatchTool {
    pub const fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }
}

impl PatchTool for RealPatchTool {
    fn apply(&self, patch: &Path) -> Result<ExecOutput> {
        let patch_arg = patch.display().to_string();
        let output = Command::new("patch")
            .args(["-p1", "-i", &patch_arg])
            .current_dir(&self.working_dir)
            .output()
            .context("Failed to execute patch")?;

        Ok(ExecOutput::from_output(&output))
    }
}

/// Check if the `patch` utility is available on PATH
pub fn is_patch_available() -> bool {
    Command::new("patch")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
