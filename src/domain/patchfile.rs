//! Scoped patch file artifact
//!
//! The downloaded patch is written to disk only for the duration of one
//! command invocation. Removal happens in `Drop`, so the file is cleaned up
//! on every path out of the apply flow, including early returns and errors.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A temporary patch file that removes itself when dropped
#[derive(Debug)]
pub struct PatchFile {
    path: PathBuf,
    file_name: String,
}

impl PatchFile {
    /// Write `contents` to `dir/file_name` and return the guard.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write(dir: &Path, file_name: &str, contents: &[u8]) -> Result<Self> {
        let path = dir.join(file_name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write patch file: {}", path.display()))?;

        Ok(Self {
            path,
            file_name: file_name.to_string(),
        })
    }

    /// Absolute or caller-relative path of the patch file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bare filename, used as the commit message in the git strategy
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Drop for PatchFile {
    fn drop(&mut self) {
        // Removal failure is not actionable at this point
        let _ = std::fs::remove_file(&self.path);
    }
}
