//! Apply command - Fetch and apply the latest patch from an issue

use anyhow::{Context, Result};

use crate::color;
use crate::commands::common::detect_repo_root;
use crate::config::Config;
use crate::integrations::git::RealGitClient;
use crate::integrations::patch::{is_patch_available, RealPatchTool};
use crate::integrations::tracker::HttpTracker;
use crate::service::{PatchApplicator, Strategy};

/// Fetch the latest patch attached to an issue and apply it.
///
/// Strategy selection (first match wins): inside a git repository the patch
/// is applied via a scratch branch and merged into the issue branch; outside
/// one it falls back to the `patch` utility; with neither available the
/// command reports the unsupported environment and exits 1.
///
/// Returns the process exit code (0 success, 1 any handled failure).
///
/// # Errors
/// Returns an error if:
/// - Configuration cannot be loaded or lacks a tracker base URL
/// - The issue lookup or patch download fails
/// - The patch file cannot be written
/// - A git plumbing operation fails unexpectedly
pub fn cmd_apply(issue_id: u64, color_mode: color::ColorMode) -> Result<i32> {
    // Capability context is resolved once, up front
    let repo_root = detect_repo_root();

    let config = match &repo_root {
        Some(root) => Config::load_from_repo_root(root)?,
        None => Config::load()?,
    };

    let tracker = HttpTracker::from_config(&config.tracker)?;
    let working_dir = std::env::current_dir().context("Failed to resolve working directory")?;

    let strategy = match repo_root {
        Some(root) => Strategy::VersionControl(RealGitClient::new(root)),
        None if is_patch_available() => {
            Strategy::PlainPatch(RealPatchTool::new(working_dir.clone()))
        }
        None => Strategy::Unsupported,
    };

    let applicator = PatchApplicator::new(tracker);
    let exit_code = applicator.run(issue_id, &strategy, &working_dir, color_mode)?;

    if exit_code == 0 {
        eprintln!(
            "{}",
            color::success(color_mode, format!("Applied latest patch from issue {issue_id}"))
        );
    }

    Ok(exit_code)
}
