use tracing::{error, info, warn};

use crate::domain::prompt::{EMPTY_CHANGELOG, build_prompt, format_weeks};
use crate::domain::week_group::WeekGroup;
use crate::error::AppResult;
use crate::services::LanguageModelService;

/// Merges the week groups into `existing` with a single model call.
///
/// When nothing survives filtering the model is not called and the existing
/// changelog comes back unchanged.
pub async fn generate_changelog(
    language_model: &dyn LanguageModelService,
    weeks: &[WeekGroup],
    existing: &str,
) -> AppResult<String> {
    let formatted = format_weeks(weeks);
    if formatted.is_empty() {
        warn!("No meaningful commits found to generate changelog");
        return Ok(if existing.is_empty() {
            EMPTY_CHANGELOG.to_string()
        } else {
            existing.to_string()
        });
    }

    let prompt = build_prompt(&formatted, existing);
    info!(
        weeks = formatted.len(),
        prompt_bytes = prompt.len(),
        "Sending request to the language model"
    );

    let changelog = language_model
        .generate_text(&prompt)
        .await
        .inspect_err(|err| error!("Error generating changelog: {err}"))?;

    info!("Successfully generated and merged changelog");
    Ok(changelog)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};

    use crate::domain::commit::{Commit, FileChange, FileStatus};
    use crate::domain::week_group::group_by_week;
    use crate::error::AppError;
    use crate::services::stub::StubLanguageModel;

    fn commit(message: &str) -> Commit {
        Commit {
            sha: "abc".to_string(),
            message: message.to_string(),
            author: "Ada".to_string(),
            date: DateTime::parse_from_rfc3339("2024-06-10T10:00:00Z")
                .expect("valid date")
                .with_timezone(&Utc),
            files: vec![FileChange {
                filename: "src/login.js".to_string(),
                status: FileStatus::Added,
                additions: 40,
                deletions: 0,
                changes: 40,
                patch: Some("+export function login() {}".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn returns_model_text_verbatim() {
        let model = StubLanguageModel::replying("# Changelog\n\n## [2024-06-10]\n- Added login page");
        let weeks = group_by_week(vec![commit("Add login page")]);

        let changelog = generate_changelog(&model, &weeks, "# Changelog\n")
            .await
            .expect("changelog");

        assert_eq!(changelog, "# Changelog\n\n## [2024-06-10]\n- Added login page");
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("## [2024-06-10]"));
        assert!(prompts[0].contains("Add login page"));
        assert!(prompts[0].contains("src/login.js (added): +40 -0"));
    }

    #[tokio::test]
    async fn skips_model_when_only_merges_remain() {
        let model = StubLanguageModel::replying("unused");
        let weeks = group_by_week(vec![commit("Merge pull request #12 from org/login")]);

        let changelog = generate_changelog(&model, &weeks, "# Changelog\n\n## [2024-06-03]\n")
            .await
            .expect("changelog");

        assert_eq!(changelog, "# Changelog\n\n## [2024-06-03]\n");
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn falls_back_to_placeholder_without_existing_changelog() {
        let model = StubLanguageModel::replying("unused");

        let changelog = generate_changelog(&model, &[], "").await.expect("changelog");

        assert_eq!(changelog, "# Changelog\n\nNo changes to report.");
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn propagates_model_failure() {
        let model = StubLanguageModel::failing("quota exceeded");
        let weeks = group_by_week(vec![commit("Add login page")]);

        let err = generate_changelog(&model, &weeks, "")
            .await
            .expect_err("generation should fail");

        assert!(matches!(err, AppError::Generation(message) if message == "quota exceeded"));
        assert_eq!(model.prompts().len(), 1);
    }
}
