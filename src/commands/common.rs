//! Common utility functions for command handlers

use std::path::PathBuf;
use std::process::Command;

/// Detect the root of the enclosing git repository, if any.
///
/// Returns `None` when not inside a working tree or when git itself is not
/// available. Either way there is no version-control context to use.
#[must_use]
pub fn detect_repo_root() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        return None;
    }

    Some(PathBuf::from(root))
}
