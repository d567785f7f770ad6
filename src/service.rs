#![allow(clippy::missing_errors_doc)]
//! Patch application orchestration
//!
//! `PatchApplicator` drives the full flow for one issue: resolve the issue,
//! download its latest patch attachment, persist it to a scoped temp file,
//! and hand it to the capability-selected `Strategy`. The temp file is
//! removed on every path out of `run`, success or failure.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::color;
use crate::domain::issue::Issue;
use crate::domain::patchfile::PatchFile;
use crate::integrations::git::GitClient;
use crate::integrations::patch::PatchTool;
use crate::integrations::tracker::IssueTracker;

/// Patch application strategy, resolved once from environment capability
///
/// First match wins: an active git repository selects the version-control
/// strategy, otherwise an available `patch` utility selects the plain-patch
/// strategy, otherwise the environment is unsupported.
pub enum Strategy<G, P>
where
    G: GitClient,
    P: PatchTool,
{
    /// Apply on a scratch branch and three-way merge into the issue branch
    VersionControl(G),
    /// Apply directly to the working tree with `patch -p1`
    PlainPatch(P),
    /// Neither git nor `patch` is available
    Unsupported,
}

impl<G, P> Strategy<G, P>
where
    G: GitClient,
    P: PatchTool,
{
    /// Apply the downloaded patch, returning the strategy's exit code.
    ///
    /// Tool failures (non-zero exits from git apply, merge, or patch) are
    /// reported to stderr with the tool's combined output and converted to
    /// exit code 1, not errors.
    pub fn apply(
        &self,
        issue: &Issue,
        patch: &PatchFile,
        color_mode: color::ColorMode,
    ) -> Result<i32> {
        match self {
            Self::VersionControl(git) => apply_with_git(git, issue, patch, color_mode),
            Self::PlainPatch(tool) => apply_with_patch(tool, patch, color_mode),
            Self::Unsupported => {
                eprintln!(
                    "{}",
                    color::error(
                        color_mode,
                        "This is not a git repository and the `patch` command is not available"
                    )
                );
                Ok(1)
            }
        }
    }
}

/// Version-control strategy
///
/// The patch is applied on a scratch branch created from the issue's base
/// version branch, committed, and merged into the long-lived issue branch
/// preferring the freshly applied changes over any divergent local state.
fn apply_with_git<G: GitClient>(
    git: &G,
    issue: &Issue,
    patch: &PatchFile,
    color_mode: color::ColorMode,
) -> Result<i32> {
    let branch = issue.branch_name();
    let version_branch = issue.version_branch().with_context(|| {
        format!(
            "Issue {} has no target version to determine the base branch",
            issue.id
        )
    })?;

    // The long-lived issue branch must exist before the merge below
    if !git.branch_exists(&branch)? {
        eprintln!(
            "{}",
            color::info(
                color_mode,
                format!("Creating issue branch {branch} from {version_branch}")
            )
        );
        git.checkout(&version_branch)?;
        git.create_branch(&branch)?;
    }

    // Apply the patch on a scratch branch off the base version branch, then
    // three-way merge into the issue branch.
    let temp_branch = issue.temp_branch_name();
    git.checkout(&version_branch)?;
    eprintln!(
        "{}",
        color::info(color_mode, format!("Creating temp branch {temp_branch}"))
    );
    git.create_branch(&temp_branch)?;
    git.checkout(&temp_branch)?;

    let applied = git.apply_index(patch.path())?;
    if !applied.success() {
        eprintln!("{}", color::error(color_mode, "Failed to apply the patch"));
        eprint!("{}", applied.output);
        return Ok(1);
    }

    eprintln!(
        "{}",
        color::info(color_mode, format!("Committing {}", patch.file_name()))
    );
    git.commit(patch.file_name())?;

    eprintln!(
        "{}",
        color::info(color_mode, format!("Checking out {branch} and merging"))
    );
    git.checkout(&branch)?;

    let merged = git.merge_prefer_incoming(&temp_branch)?;
    if !merged.success() {
        // The scratch branch is left in place on merge failure
        eprintln!(
            "{}",
            color::error(color_mode, "Failed to merge the patch branch")
        );
        eprint!("{}", merged.output);
        return Ok(1);
    }

    let deleted = git.delete_branch(&temp_branch)?;
    if !deleted.success() {
        eprint!("{}", deleted.output);
    }
    Ok(deleted.code)
}

/// Plain-patch strategy: `patch -p1` against the working tree, no commit
fn apply_with_patch<P: PatchTool>(
    tool: &P,
    patch: &PatchFile,
    color_mode: color::ColorMode,
) -> Result<i32> {
    let result = tool.apply(patch.path())?;

    if !result.success() {
        eprintln!("{}", color::error(color_mode, "Failed to apply the patch"));
        eprint!("{}", result.output);
        return Ok(1);
    }

    Ok(result.code)
}

/// Coordinates issue lookup, patch download, and strategy execution
pub struct PatchApplicator<T: IssueTracker> {
    tracker: T,
}

impl<T: IssueTracker> PatchApplicator<T> {
    pub const fn new(tracker: T) -> Self {
        Self { tracker }
    }

    /// Fetch the latest patch for `issue_id`, write it under `dir`, and run
    /// the given strategy. Returns the process exit code.
    ///
    /// The patch file is removed before returning on every path, including
    /// strategy failures and errors.
    pub fn run<G, P>(
        &self,
        issue_id: u64,
        strategy: &Strategy<G, P>,
        dir: &Path,
        color_mode: color::ColorMode,
    ) -> Result<i32>
    where
        G: GitClient,
        P: PatchTool,
    {
        let spinner = if color_mode.should_colorize() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Fetching issue {issue_id}"));
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let fetched = self.fetch_latest_patch(issue_id, spinner.as_ref());

        // Clear spinner before any other output
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let (issue, contents) = fetched?;

        eprintln!(
            "{}",
            color::info(
                color_mode,
                format!("Applying latest patch from issue {}: {}", issue.id, issue.title)
            )
        );

        // Dropped at the end of this scope, whatever the strategy does
        let patch = PatchFile::write(dir, &issue.patch_file_name(), &contents)?;

        strategy.apply(&issue, &patch, color_mode)
    }

    fn fetch_latest_patch(
        &self,
        issue_id: u64,
        spinner: Option<&ProgressBar>,
    ) -> Result<(Issue, Vec<u8>)> {
        let issue = self.tracker.fetch_issue(issue_id)?;

        let attachment = issue
            .latest_attachment()
            .cloned()
            .with_context(|| format!("Issue {issue_id} has no file attachments"))?;

        if let Some(pb) = spinner {
            let name = attachment.name.as_deref().unwrap_or("latest patch");
            pb.set_message(format!("Downloading {name}"));
        }

        let contents = self.tracker.download(&attachment.url)?;
        Ok((issue, contents))
    }
}
