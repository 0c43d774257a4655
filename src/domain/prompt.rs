use chrono::{NaiveDate, SecondsFormat};

use crate::domain::commit::{Commit, FileChange};
use crate::domain::week_group::WeekGroup;

pub const EMPTY_CHANGELOG: &str = "# Changelog\n\nNo changes to report.";

const SEED_CHANGELOG: &str =
    "# Changelog\n\nAll notable changes to this project will be documented in this file.";
const PATCH_PREVIEW_LINES: usize = 20;

/// Prompt-ready text for one week of commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedWeek {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub commits_text: String,
}

/// Formats every group, dropping merge commits, lock files and weeks left
/// with nothing to report.
pub fn format_weeks(groups: &[WeekGroup]) -> Vec<FormattedWeek> {
    groups
        .iter()
        .map(|group| FormattedWeek {
            week_start: group.week_start,
            week_end: group.week_end,
            commits_text: format_commits(&group.commits),
        })
        .filter(|week| !week.commits_text.is_empty())
        .collect()
}

fn format_commits(commits: &[Commit]) -> String {
    commits
        .iter()
        .filter(|commit| !commit.is_merge())
        .map(format_commit)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn format_commit(commit: &Commit) -> String {
    let files = commit
        .files
        .iter()
        .filter(|file| !file.is_lock_file())
        .map(format_file)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n**Commit:** {}\n**Author:** {}\n**Date:** {}\n**Files changed:**\n{}\n",
        commit.message,
        commit.author,
        commit.date.to_rfc3339_opts(SecondsFormat::Secs, true),
        files
    )
}

fn format_file(file: &FileChange) -> String {
    let mut line = format!(
        "  - {} ({}): +{} -{}",
        file.filename, file.status, file.additions, file.deletions
    );
    if let Some(patch) = file.patch.as_deref().filter(|p| !p.is_empty()) {
        let preview = patch
            .lines()
            .take(PATCH_PREVIEW_LINES)
            .collect::<Vec<_>>()
            .join("\n");
        line.push('\n');
        line.push_str(&preview);
    }
    line
}

/// Builds the single prompt that asks the model to categorize the new weeks
/// and merge them into `existing`.
pub fn build_prompt(weeks: &[FormattedWeek], existing: &str) -> String {
    let changelog = if existing.is_empty() {
        SEED_CHANGELOG
    } else {
        existing
    };

    let weeks_data = weeks
        .iter()
        .map(|week| {
            format!(
                "### Week: {} to {}\n\n{}",
                week.week_start, week.week_end, week.commits_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let header_example = weeks
        .first()
        .map(|week| week.week_start.to_string())
        .unwrap_or_else(|| "YYYY-MM-DD".to_string());

    format!(
        "You are a technical documentation expert. Your task is to analyze commits and create/update a changelog.

EXISTING CHANGELOG:
{changelog}

NEW COMMITS TO ANALYZE:
{weeks_data}

TASK:
1. Analyze the new commits and group changes by category: Features, Bug Fixes, Performance, Documentation, Refactoring, Other
2. For each category, create concise bullet points in markdown format
3. Create a new section for each week with date headers like: ## [{header_example}]
4. Merge the new sections into the existing changelog at the top, above prior content (newest first)
5. Avoid duplicates - check if similar changes already exist in the existing changelog
6. Ignore merge commits and trivial configuration-only changes
7. Use professional, clear language that describes WHAT changed and WHY it matters
8. Each bullet point should be actionable and user-focused

OUTPUT FORMAT RULES:
- Start with \"# Changelog\" header if not present
- New week sections go at the TOP (after the header)
- Keep chronological order (newest first)
- Only include categories that have actual changes
- Each bullet should start with a verb (Added, Fixed, Improved, Updated, etc.)
- Be concise but descriptive

Return ONLY the complete merged changelog in markdown format. No explanations, no additional text."
    )
}
