//! Issue model and naming rules
//!
//! Issues are read-only records owned by the tracker service. This module
//! derives everything the apply flow needs from them: the patch filename,
//! the long-lived issue branch name, and the base version branch.

use serde::Deserialize;

/// An issue as returned by the tracker API
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Numeric issue ID
    pub id: u64,
    /// Issue title (used to derive the patch filename)
    pub title: String,
    /// Target version the fix is developed against (e.g. "2.1.x-dev")
    #[serde(default)]
    pub version: Option<String>,
    /// File attachments in service-provided upload order
    #[serde(default)]
    pub files: Vec<Attachment>,
}

/// A file attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// Download URL for the raw file contents
    pub url: String,
    /// Original filename, if the service provides one
    #[serde(default)]
    pub name: Option<String>,
}

impl Issue {
    /// The latest attachment is the last one in service order.
    ///
    /// Attachment metadata may lack reliable timestamps, so "latest" is
    /// defined by upload order, never by timestamp parsing.
    #[must_use]
    pub fn latest_attachment(&self) -> Option<&Attachment> {
        self.files.last()
    }

    /// Issue title with characters unsafe for filenames and branch names
    /// stripped. Whitespace runs collapse to a single `-`.
    #[must_use]
    pub fn clean_title(&self) -> String {
        let cleaned: String = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();

        if cleaned.is_empty() {
            format!("issue-{}", self.id)
        } else {
            cleaned
        }
    }

    /// Local filename the downloaded patch is written to
    #[must_use]
    pub fn patch_file_name(&self) -> String {
        format!("{}.patch", self.clean_title())
    }

    /// Name of the long-lived branch dedicated to this issue
    #[must_use]
    pub fn branch_name(&self) -> String {
        format!("{}-{}", self.id, self.clean_title())
    }

    /// Name of the short-lived branch used to isolate patch application
    #[must_use]
    pub fn temp_branch_name(&self) -> String {
        format!("{}-patch-temp", self.branch_name())
    }

    /// Base version branch the issue targets.
    ///
    /// The tracker reports development versions like "2.1.x-dev"; the
    /// corresponding branch drops the "-dev" suffix.
    #[must_use]
    pub fn version_branch(&self) -> Option<String> {
        self.version
            .as_deref()
            .map(|v| v.trim().trim_end_matches("-dev").to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str) -> Issue {
        Issue {
            id: 123,
            title: title.to_string(),
            version: Some("2.1.x-dev".to_string()),
            files: Vec::new(),
        }
    }

    #[test]
    fn test_clean_title_replaces_whitespace() {
        assert_eq!(issue("Fix the thing").clean_title(), "Fix-the-thing");
    }

    #[test]
    fn test_clean_title_strips_unsafe_characters() {
        assert_eq!(
            issue("Fix foo() / bar: \"baz\"").clean_title(),
            "Fix-foo-bar-baz"
        );
    }

    #[test]
    fn test_clean_title_collapses_whitespace_runs() {
        assert_eq!(issue("Fix   the\tthing").clean_title(), "Fix-the-thing");
    }

    #[test]
    fn test_clean_title_keeps_dashes_and_underscores() {
        assert_eq!(issue("add foo_bar-baz").clean_title(), "add-foo_bar-baz");
    }

    #[test]
    fn test_clean_title_empty_falls_back_to_id() {
        assert_eq!(issue("???").clean_title(), "issue-123");
        assert_eq!(issue("").clean_title(), "issue-123");
    }

    #[test]
    fn test_patch_file_name() {
        assert_eq!(issue("Fix the thing").patch_file_name(), "Fix-the-thing.patch");
    }

    #[test]
    fn test_branch_name_includes_id() {
        assert_eq!(issue("Fix the thing").branch_name(), "123-Fix-the-thing");
    }

    #[test]
    fn test_temp_branch_name() {
        assert_eq!(
            issue("Fix the thing").temp_branch_name(),
            "123-Fix-the-thing-patch-temp"
        );
    }

    #[test]
    fn test_version_branch_strips_dev_suffix() {
        assert_eq!(
            issue("x").version_branch(),
            Some("2.1.x".to_string())
        );
    }

    #[test]
    fn test_version_branch_without_dev_suffix() {
        let mut i = issue("x");
        i.version = Some("main".to_string());
        assert_eq!(i.version_branch(), Some("main".to_string()));
    }

    #[test]
    fn test_version_branch_missing() {
        let mut i = issue("x");
        i.version = None;
        assert_eq!(i.version_branch(), None);

        i.version = Some(String::new());
        assert_eq!(i.version_branch(), None);
    }

    #[test]
    fn test_latest_attachment_is_last_in_order() {
        let mut i = issue("x");
        i.files = vec![
            Attachment {
                url: "https://tracker.test/files/fix-1.patch".to_string(),
                name: Some("fix-1.patch".to_string()),
            },
            Attachment {
                url: "https://tracker.test/files/fix-2.patch".to_string(),
                name: Some("fix-2.patch".to_string()),
            },
        ];
        assert_eq!(
            i.latest_attachment().map(|a| a.url.as_str()),
            Some("https://tracker.test/files/fix-2.patch")
        );
    }

    #[test]
    fn test_latest_attachment_empty() {
        assert!(issue("x").latest_attachment().is_none());
    }

    #[test]
    fn test_deserialize_from_tracker_json() {
        let json = r#"{
            "id": 4242,
            "title": "Broken config merge",
            "version": "1.0.x-dev",
            "files": [
                {"url": "https://tracker.test/files/a.patch", "name": "a.patch"},
                {"url": "https://tracker.test/files/b.patch"}
            ]
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 4242);
        assert_eq!(issue.title, "Broken config merge");
        assert_eq!(issue.files.len(), 2);
        assert_eq!(issue.files[1].name, None);
        assert_eq!(issue.version_branch(), Some("1.0.x".to_string()));
    }

    #[test]
    fn test_deserialize_minimal_issue() {
        let json = r#"{"id": 7, "title": "minimal"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.files.is_empty());
        assert!(issue.version.is_none());
    }
}
