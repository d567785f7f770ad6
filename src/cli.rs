use clap::{Parser, Subcommand};

/// Issue tracker CLI for fetching and applying patches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the latest patch from an issue
    ///
    /// Before applying the patch, an issue branch is checked out.
    /// If the branch doesn't exist, it will be created.
    Apply {
        /// The issue ID
        issue: u64,
    },
    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        shell: String,
    },
}
