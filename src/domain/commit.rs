use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Generated dependency manifests that never feed the changelog.
pub const LOCK_FILES: [&str; 3] = ["package-lock.json", "yarn.lock", "pnpm-lock.yaml"];

const BUILD_OUTPUT_DIR: &str = "dist";
const PATCH_CHANGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Other,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
            FileStatus::Changed => "changed",
            FileStatus::Unchanged => "unchanged",
            FileStatus::Other => "other",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub filename: String,
    pub status: FileStatus,
    pub additions: u32,
    pub deletions: u32,
    pub changes: u32,
    pub patch: Option<String>,
}

impl FileChange {
    pub fn is_lock_file(&self) -> bool {
        is_lock_file(&self.filename)
    }

    /// Drops the patch text unless [`retains_patch`] allows it.
    pub fn with_patch_policy(mut self) -> Self {
        if !retains_patch(&self.filename, self.changes) {
            self.patch = None;
        }
        self
    }
}

pub fn is_lock_file(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|name| LOCK_FILES.contains(&name))
}

/// True when any parent directory of `path` is a `dist/` build output.
pub fn is_build_output(path: &str) -> bool {
    path.split('/').rev().skip(1).any(|dir| dir == BUILD_OUTPUT_DIR)
}

/// Small diffs keep their patch for context; generated files and large diffs
/// only keep their line counts.
pub fn retains_patch(path: &str, changes: u32) -> bool {
    if is_lock_file(path) || is_build_output(path) {
        return false;
    }
    changes < PATCH_CHANGE_LIMIT
}

/// Commit metadata as returned by a history listing, before file details are
/// known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub files: Vec<FileChange>,
}

impl Commit {
    pub fn from_summary(summary: CommitSummary, files: Vec<FileChange>) -> Self {
        Self {
            sha: summary.sha,
            message: summary.message,
            author: summary.author,
            date: summary.date,
            files,
        }
    }

    pub fn is_merge(&self) -> bool {
        self.message.to_lowercase().starts_with("merge")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(filename: &str, changes: u32) -> FileChange {
        FileChange {
            filename: filename.to_string(),
            status: FileStatus::Modified,
            additions: changes,
            deletions: 0,
            changes,
            patch: Some("@@ -0,0 +1 @@\n+line".to_string()),
        }
    }

    #[test]
    fn keeps_patch_below_change_limit() {
        assert!(file("src/app.rs", 49).with_patch_policy().patch.is_some());
        assert!(file("src/app.rs", 50).with_patch_policy().patch.is_none());
    }

    #[test]
    fn never_keeps_lock_file_patch() {
        assert!(!retains_patch("pnpm-lock.yaml", 1));
        assert!(!retains_patch("frontend/yarn.lock", 0));
        assert!(file("web/package-lock.json", 3).with_patch_policy().patch.is_none());
    }

    #[test]
    fn never_keeps_build_output_patch() {
        assert!(!retains_patch("dist/bundle.js", 2));
        assert!(!retains_patch("packages/ui/dist/index.js", 2));
        assert!(retains_patch("redist/notes.txt", 2));
        assert!(retains_patch("src/dist", 2));
    }

    #[test]
    fn detects_merge_commits_case_insensitively() {
        let commit = |message: &str| Commit {
            sha: "abc".to_string(),
            message: message.to_string(),
            author: "dev".to_string(),
            date: DateTime::<Utc>::default(),
            files: Vec::new(),
        };
        assert!(commit("Merge pull request #12 from org/feature").is_merge());
        assert!(commit("merge branch 'main'").is_merge());
        assert!(!commit("Add merge sort").is_merge());
    }

    #[test]
    fn parses_unknown_status_as_other() {
        let status: FileStatus = serde_json::from_str("\"renamed\"").expect("status");
        assert_eq!(status, FileStatus::Renamed);
        let status: FileStatus = serde_json::from_str("\"typechange\"").expect("status");
        assert_eq!(status, FileStatus::Other);
    }
}
