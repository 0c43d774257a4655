use async_trait::async_trait;

use crate::domain::commit::{CommitSummary, FileChange};
use crate::error::AppResult;

/// Read access to a hosted repository's commit history.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Most recent `count` commits of the default branch, newest first.
    async fn list_commits(&self, count: usize) -> AppResult<Vec<CommitSummary>>;
    /// Per-file changes of a single commit, with raw patch text when available.
    async fn commit_files(&self, sha: &str) -> AppResult<Vec<FileChange>>;
}
