use clap::{Args, Subcommand};

use crate::config::{
    DEFAULT_CHANGELOG_PATH, DEFAULT_COMMITS_COUNT, DEFAULT_GEMINI_MODEL, DEFAULT_GITHUB_API_URL,
    Settings,
};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration read from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let settings = Settings::from_env();

    println!("GitHub token: {}", mask_secret(&settings.github_token));
    println!("Google API key: {}", mask_secret(&settings.google_api_key));
    println!("Repository: {}", display_value(&settings.repository));
    println!(
        "Commits to analyze: {}",
        display_or_default(&settings.commits_count, &DEFAULT_COMMITS_COUNT.to_string())
    );
    println!(
        "Changelog path: {}",
        display_or_default(&settings.changelog_path, DEFAULT_CHANGELOG_PATH)
    );
    println!(
        "Gemini model: {}",
        display_or_default(&settings.gemini_model, DEFAULT_GEMINI_MODEL)
    );
    println!(
        "GitHub API URL: {}",
        display_or_default(&settings.github_api_url, DEFAULT_GITHUB_API_URL)
    );
    println!("Actions output file: {}", display_value(&settings.github_output));

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn display_or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("{default} (default)"))
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let prefix: String = token.chars().take(3).collect();
            let suffix: String = token.chars().skip(token.chars().count() - 3).collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
