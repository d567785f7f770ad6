//! Shared helpers for integration tests: a stub tracker server and git
//! repository fixtures.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::Command;
use std::thread;

/// Minimal in-process HTTP server standing in for the issue tracker.
///
/// Binding and serving are separate steps so tests can embed the server's
/// own address in the issue JSON they serve.
pub struct StubTracker {
    listener: TcpListener,
    base_url: String,
}

impl StubTracker {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        Self { listener, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn file_url(&self, name: &str) -> String {
        format!("{}/files/{name}", self.base_url)
    }

    /// Serve requests until the test process exits.
    ///
    /// `/issues/...` returns `issue_status` with `issue_json`; the exact
    /// `patch_path` returns the patch body; anything else is a 404.
    pub fn serve(&self, issue_status: &'static str, issue_json: String, patch_path: String, patch_body: String) {
        let listener = self.listener.try_clone().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };

                let mut buf = [0u8; 8192];
                let n = stream.read(&mut buf).unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();

                let (status, body) = if path.starts_with("/issues/") {
                    (issue_status, issue_json.clone())
                } else if path == patch_path {
                    ("HTTP/1.1 200 OK", patch_body.clone())
                } else {
                    ("HTTP/1.1 404 Not Found", String::new())
                };

                let response = format!(
                    "{status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
    }
}

/// Run git in `dir`, asserting success
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialize a repository on `version_branch` with a committed README.md
pub fn init_repo(dir: &Path, version_branch: &str) {
    git(dir, &["init", "-b", version_branch]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    std::fs::write(dir.join("README.md"), "hello\n").unwrap();
    git(dir, &["add", "README.md"]);
    git(dir, &["commit", "-m", "Initial commit"]);
}

pub fn current_branch(dir: &Path) -> String {
    let output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(dir)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn branch_exists(dir: &Path, branch: &str) -> bool {
    Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", &format!("refs/heads/{branch}")])
        .current_dir(dir)
        .output()
        .unwrap()
        .status
        .success()
}

/// Names of leftover `.patch` files in `dir`
pub fn patch_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            name.ends_with(".patch").then_some(name)
        })
        .collect()
}

/// Issue JSON with two attachments; the second (latest) is `fix-2.patch`
pub fn issue_json_two_files(server: &StubTracker) -> String {
    format!(
        r#"{{"id": 123, "title": "Fix the thing", "version": "1.0.x-dev", "files": [
            {{"url": "{}", "name": "fix-1.patch"}},
            {{"url": "{}", "name": "fix-2.patch"}}
        ]}}"#,
        server.file_url("fix-1.patch"),
        server.file_url("fix-2.patch"),
    )
}

/// Unified diff that applies cleanly to the fixture README.md
pub const GOOD_PATCH: &str = "--- a/README.md
+++ b/README.md
@@ -1 +1 @@
-hello
+hello patched
";

/// Unified diff touching a file that does not exist in the fixture repo
pub const BAD_PATCH: &str = "--- a/missing.txt
+++ b/missing.txt
@@ -1 +1 @@
-x
+y
";
