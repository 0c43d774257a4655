use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;
use tracing::debug;

use crate::config::Repository;
use crate::domain::commit::{CommitSummary, FileChange, FileStatus};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const MAX_PAGE_SIZE: usize = 100;
const UNKNOWN_AUTHOR: &str = "unknown";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
    repository: Repository,
}

impl GitHubClient {
    pub fn new(api_url: String, token: String, repository: Repository) -> Self {
        Self {
            http: Client::new(),
            api_url,
            token,
            repository,
        }
    }

    fn commits_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.api_url.trim_end_matches('/'),
            self.repository.owner,
            self.repository.name
        )
    }

    fn commit_endpoint(&self, sha: &str) -> String {
        format!("{}/{}", self.commits_endpoint(), sha)
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> AppResult<Response> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(API_VERSION_HEADER, API_VERSION)
            .header(USER_AGENT, concat!("weeklog/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(status_error(status, url, &body));
        }
        Ok(response)
    }

    async fn commit_page(
        &self,
        url: &str,
        page: usize,
        per_page: usize,
    ) -> AppResult<Vec<CommitSummary>> {
        let query = [("per_page", per_page.to_string()), ("page", page.to_string())];
        let payload: Vec<GitHubCommitListItem> = self
            .get(url, &query)
            .await?
            .json()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to parse GitHub commit list: {err}")))?;

        debug!(page, received = payload.len(), "listed commits");
        Ok(payload.into_iter().map(CommitSummary::from).collect())
    }
}

fn status_error(status: StatusCode, url: &str, body: &str) -> AppError {
    AppError::Fetch(format!("GitHub responded with {status} for {url}: {body}"))
}

/// Walks pages of at most 100 items until `count` items are collected or a
/// short page marks the end of history.
async fn collect_pages<T, F, Fut>(count: usize, mut fetch_page: F) -> AppResult<Vec<T>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = AppResult<Vec<T>>>,
{
    let page_size = count.clamp(1, MAX_PAGE_SIZE);
    let mut items = Vec::with_capacity(page_size);
    let mut page = 1usize;

    while items.len() < count {
        let batch = fetch_page(page, page_size).await?;
        let received = batch.len();
        items.extend(batch);
        if received < page_size {
            break;
        }
        page += 1;
    }

    items.truncate(count);
    Ok(items)
}

#[async_trait]
impl VersionControlService for GitHubClient {
    async fn list_commits(&self, count: usize) -> AppResult<Vec<CommitSummary>> {
        let endpoint = self.commits_endpoint();
        let url = endpoint.as_str();
        collect_pages(count, |page, per_page| self.commit_page(url, page, per_page)).await
    }

    async fn commit_files(&self, sha: &str) -> AppResult<Vec<FileChange>> {
        let payload: GitHubCommitDetail = self
            .get(&self.commit_endpoint(sha), &[])
            .await?
            .json()
            .await
            .map_err(|err| {
                AppError::Fetch(format!("failed to parse GitHub commit {sha}: {err}"))
            })?;

        Ok(payload.files.into_iter().map(FileChange::from).collect())
    }
}

#[derive(Deserialize)]
struct GitHubCommitListItem {
    sha: String,
    commit: GitHubCommitData,
}

#[derive(Deserialize)]
struct GitHubCommitData {
    message: String,
    author: GitHubCommitAuthor,
}

#[derive(Deserialize)]
struct GitHubCommitAuthor {
    name: Option<String>,
    date: DateTime<Utc>,
}

impl From<GitHubCommitListItem> for CommitSummary {
    fn from(item: GitHubCommitListItem) -> Self {
        Self {
            sha: item.sha,
            message: item.commit.message,
            author: item
                .commit
                .author
                .name
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            date: item.commit.author.date,
        }
    }
}

#[derive(Deserialize)]
struct GitHubCommitDetail {
    #[serde(default)]
    files: Vec<GitHubFile>,
}

#[derive(Deserialize)]
struct GitHubFile {
    filename: String,
    status: FileStatus,
    #[serde(default)]
    additions: u32,
    #[serde(default)]
    deletions: u32,
    #[serde(default)]
    changes: u32,
    patch: Option<String>,
}

impl From<GitHubFile> for FileChange {
    fn from(file: GitHubFile) -> Self {
        Self {
            filename: file.filename,
            status: file.status,
            additions: file.additions,
            deletions: file.deletions,
            changes: file.changes,
            patch: file.patch,
        }
    }
}
