#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

use crate::config::TrackerConfig;
use crate::domain::issue::Issue;

/// Issue tracker interface
///
/// Covers the two operations the apply flow consumes: resolving an issue ID
/// to its metadata and downloading a raw attachment body.
pub trait IssueTracker {
    /// Fetch issue metadata by numeric ID
    fn fetch_issue(&self, id: u64) -> Result<Issue>;

    /// Download the raw contents of an attachment URL
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP tracker client backed by the service's REST API
#[derive(Debug)]
pub struct HttpTracker {
    client: Client,
    base_url: String,
}

impl HttpTracker {
    /// Build a client from configuration.
    ///
    /// Fails if no tracker base URL is configured; the command cannot
    /// guess which service to talk to.
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let base_url = config.resolved_base_url().context(
            "Tracker base URL is not configured. \
             Set tracker.base_url in .trak.toml or the TRAK_TRACKER_URL environment variable",
        )?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn issue_url(&self, id: u64) -> String {
        format!("{}/issues/{id}.json", self.base_url)
    }
}

impl IssueTracker for HttpTracker {
    fn fetch_issue(&self, id: u64) -> Result<Issue> {
        let url = self.issue_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Issue lookup request failed: {url}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            anyhow::bail!("Issue {id} not found");
        }

        if !response.status().is_success() {
            anyhow::bail!("Issue lookup failed with status {}: {url}", response.status());
        }

        let issue: Issue = response
            .json()
            .with_context(|| format!("Failed to parse issue response: {url}"))?;

        Ok(issue)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Download request failed: {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Download failed with status {}: {url}", response.status());
        }

        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read download body: {url}"))?;

        Ok(bytes.to_vec())
    }
}
