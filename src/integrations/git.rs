#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit code and combined stdout/stderr of a finished subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Process exit code (-1 if terminated by signal)
    pub code: i32,
    /// Combined stdout and stderr
    pub output: String,
}

impl ExecOutput {
    pub const fn success(&self) -> bool {
        self.code == 0
    }

    pub(crate) fn from_output(output: &std::process::Output) -> Self {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Self {
            code: output.status.code().unwrap_or(-1),
            output: combined,
        }
    }
}

/// Git client interface for the patch application flow
///
/// Plumbing operations (`checkout`, `create_branch`, `commit`) fail as
/// errors; the patch-specific operations return the raw exit code and output
/// because the caller inspects the code and surfaces tool output on failure.
pub trait GitClient {
    /// Check whether a local branch exists
    fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Checkout an existing branch
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create a branch at the current HEAD without checking it out
    fn create_branch(&self, branch: &str) -> Result<()>;

    /// Commit staged changes with the given message
    fn commit(&self, message: &str) -> Result<()>;

    /// Apply a patch file into the index (`git apply -v --index`)
    fn apply_index(&self, patch: &Path) -> Result<ExecOutput>;

    /// Merge a branch preferring its changes on conflict
    /// (`git merge --strategy recursive -X theirs`)
    fn merge_prefer_incoming(&self, branch: &str) -> Result<ExecOutput>;

    /// Force-delete a local branch (`git branch -D`)
    fn delete_branch(&self, branch: &str) -> Result<ExecOutput>;
}

/// Real git implementation, pinned to a repository root
#[derive(Debug)]
pub struct RealGitClient {
    repo_root: PathBuf,
}

impl RealGitClient {
    pub const fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))
    }
}

impl GitClient for RealGitClient {
    fn branch_exists(&self, branch: &str) -> Result<bool> {
        let refname = format!("refs/heads/{branch}");
        let output = self.git(&["rev-parse", "--verify", "--quiet", &refname])?;
        Ok(output.status.success())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let output = self.git(&["checkout", branch])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git checkout {branch} failed: {stderr}");
        }

        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        let output = self.git(&["branch", branch])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git branch {branch} failed: {stderr}");
        }

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let output = self.git(&["commit", "-m", message])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git commit failed: {stderr}");
        }

        Ok(())
    }

    fn apply_index(&self, patch: &Path) -> Result<ExecOutput> {
        let patch_arg = patch.display().to_string();
        let output = self.git(&["apply", "-v", "--index", &patch_arg])?;
        Ok(ExecOutput::from_output(&output))
    }

    fn merge_prefer_incoming(&self, branch: &str) -> Result<ExecOutput> {
        let output = self.git(&["merge", branch, "--strategy", "recursive", "-X", "theirs"])?;
        Ok(ExecOutput::from_output(&output))
    }

    fn delete_branch(&self, branch: &str) -> Result<ExecOutput> {
        let output = self.git(&["branch", "-D", branch])?;
        Ok(ExecOutput::from_output(&output))
    }
}
