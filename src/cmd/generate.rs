use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::{AppConfig, Settings};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::action_output::ActionOutputs;
use crate::infra::changelog_file::write_changelog;
use crate::infra::github::GitHubClient;
use crate::infra::llm::GeminiClient;
use crate::workflow::changelog::{ChangelogOutcome, update_changelog};

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Number of recent commits to analyze (overrides COMMITS_COUNT).
    #[arg(short = 'n', long)]
    pub commits: Option<usize>,
    /// Changelog file to merge into (overrides CHANGELOG_PATH).
    #[arg(short, long)]
    pub changelog: Option<PathBuf>,
    /// Repository as owner/repo (overrides GITHUB_REPOSITORY).
    #[arg(short, long)]
    pub repository: Option<String>,
    /// Gemini model name (overrides GEMINI_MODEL).
    #[arg(short, long)]
    pub model: Option<String>,
    /// Also write the merged changelog back to the changelog file.
    #[arg(long)]
    pub write: bool,
}

impl GenerateArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(commits) = self.commits {
            settings.commits_count = Some(commits.to_string());
        }
        if let Some(path) = &self.changelog {
            settings.changelog_path = Some(path.display().to_string());
        }
        if let Some(repository) = &self.repository {
            settings.repository = Some(repository.clone());
        }
        if let Some(model) = &self.model {
            settings.gemini_model = Some(model.clone());
        }
    }
}

pub async fn run(args: GenerateArgs) -> AppResult<()> {
    let mut settings = Settings::from_env();
    args.apply(&mut settings);
    let config = AppConfig::from_settings(settings)?;

    let version_control = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
        config.repository.clone(),
    ));
    let language_model = Arc::new(GeminiClient::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
    ));
    let context = AppContext::new(config, version_control, language_model);

    match update_changelog(&context).await? {
        ChangelogOutcome::Skipped(reason) => {
            info!("Nothing to publish: {reason}");
            Ok(())
        }
        ChangelogOutcome::Updated(changelog) => publish(&context.config, &changelog, args.write).await,
    }
}

async fn publish(config: &AppConfig, changelog: &str, write: bool) -> AppResult<()> {
    if write {
        write_changelog(&config.changelog_path, changelog).await?;
    }

    match &config.github_output {
        Some(path) => {
            let outputs = ActionOutputs::new(path.clone());
            outputs.set("changelog_content", changelog)?;
            outputs.set("changelog_updated", "true")?;
            info!("Published changelog outputs to {}", path.display());
        }
        None => println!("{changelog}"),
    }
    Ok(())
}
