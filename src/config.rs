use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DEFAULT_COMMITS_COUNT: usize = 10;
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Raw, unvalidated values as found in the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub github_token: Option<String>,
    pub google_api_key: Option<String>,
    pub repository: Option<String>,
    pub commits_count: Option<String>,
    pub changelog_path: Option<String>,
    pub gemini_model: Option<String>,
    pub github_api_url: Option<String>,
    pub github_output: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            github_token: read("GITHUB_TOKEN"),
            google_api_key: read("GOOGLE_API_KEY"),
            repository: read("GITHUB_REPOSITORY"),
            commits_count: read("COMMITS_COUNT"),
            changelog_path: read("CHANGELOG_PATH"),
            gemini_model: read("GEMINI_MODEL"),
            github_api_url: read("GITHUB_API_URL"),
            github_output: read("GITHUB_OUTPUT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn parse(slug: &str) -> AppResult<Self> {
        match slug.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(AppError::Configuration(format!(
                "repository must be given as owner/repo, got '{slug}'"
            ))),
        }
    }

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Validated configuration for a changelog run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: String,
    pub google_api_key: String,
    pub repository: Repository,
    pub commits_count: usize,
    pub changelog_path: PathBuf,
    pub gemini_model: String,
    pub github_api_url: String,
    pub github_output: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_settings(settings: Settings) -> AppResult<Self> {
        let github_token = settings
            .github_token
            .ok_or_else(|| AppError::Configuration("GITHUB_TOKEN is required".to_string()))?;
        let google_api_key = settings
            .google_api_key
            .ok_or_else(|| AppError::Configuration("GOOGLE_API_KEY is required".to_string()))?;

        let repository = settings
            .repository
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GITHUB_REPOSITORY is required".to_string()))
            .and_then(Repository::parse)?;

        let commits_count = match settings.commits_count.as_deref() {
            Some(raw) => parse_commits_count(raw)?,
            None => DEFAULT_COMMITS_COUNT,
        };

        Ok(Self {
            github_token,
            google_api_key,
            repository,
            commits_count,
            changelog_path: PathBuf::from(
                settings
                    .changelog_path
                    .unwrap_or_else(|| DEFAULT_CHANGELOG_PATH.to_string()),
            ),
            gemini_model: settings
                .gemini_model
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            github_api_url: settings
                .github_api_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_output: settings.github_output.map(PathBuf::from),
        })
    }
}

fn parse_commits_count(raw: &str) -> AppResult<usize> {
    match raw.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(AppError::Configuration(format!(
            "COMMITS_COUNT must be a positive integer, got '{raw}'"
        ))),
    }
}
