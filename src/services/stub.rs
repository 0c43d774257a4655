use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::commit::{CommitSummary, FileChange};
use crate::error::{AppError, AppResult};
use crate::services::{LanguageModelService, VersionControlService};

#[derive(Default)]
pub struct StubRepository {
    commits: Vec<CommitSummary>,
    files: HashMap<String, Vec<FileChange>>,
    failing_sha: Option<String>,
}

impl StubRepository {
    pub fn with_commit(mut self, summary: CommitSummary, files: Vec<FileChange>) -> Self {
        self.files.insert(summary.sha.clone(), files);
        self.commits.push(summary);
        self
    }

    pub fn failing_on(mut self, sha: &str) -> Self {
        self.failing_sha = Some(sha.to_string());
        self
    }
}

#[async_trait]
impl VersionControlService for StubRepository {
    async fn list_commits(&self, count: usize) -> AppResult<Vec<CommitSummary>> {
        Ok(self.commits.iter().take(count).cloned().collect())
    }

    async fn commit_files(&self, sha: &str) -> AppResult<Vec<FileChange>> {
        if self.failing_sha.as_deref() == Some(sha) {
            return Err(AppError::Fetch(format!("commit {sha} not found")));
        }
        Ok(self.files.get(sha).cloned().unwrap_or_default())
    }
}

/// Answers every prompt with a fixed reply and records what it was asked.
pub struct StubLanguageModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubLanguageModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModelService for StubLanguageModel {
    async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone().map_err(AppError::Generation)
    }
}
