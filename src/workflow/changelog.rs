use std::fmt;

use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::changelog_file::read_changelog;
use crate::workflow::fetch::fetch_commits_grouped_by_week;
use crate::workflow::generate::generate_changelog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogOutcome {
    Updated(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCommits,
    BlankChangelog,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCommits => f.write_str("no commits found to process"),
            SkipReason::BlankChangelog => f.write_str("language model returned an empty changelog"),
        }
    }
}

/// Fetch, read, generate. Empty results end the run early without failing it.
pub async fn update_changelog(ctx: &AppContext) -> AppResult<ChangelogOutcome> {
    info!(
        "Analyzing the last {} commits of {}",
        ctx.config.commits_count,
        ctx.config.repository.slug()
    );

    info!("Step 1/3: Fetching commits");
    let weeks =
        fetch_commits_grouped_by_week(ctx.version_control.as_ref(), ctx.config.commits_count)
            .await?;
    if weeks.is_empty() {
        warn!("{}", SkipReason::NoCommits);
        return Ok(ChangelogOutcome::Skipped(SkipReason::NoCommits));
    }

    info!("Step 2/3: Reading existing changelog");
    let existing = read_changelog(&ctx.config.changelog_path).await;

    info!("Step 3/3: Generating and merging changelog");
    let changelog = generate_changelog(ctx.language_model.as_ref(), &weeks, &existing).await?;
    if changelog.trim().is_empty() {
        warn!("{}", SkipReason::BlankChangelog);
        return Ok(ChangelogOutcome::Skipped(SkipReason::BlankChangelog));
    }

    info!("Changelog generation completed successfully");
    Ok(ChangelogOutcome::Updated(changelog))
}
