use futures::future::try_join_all;
use tracing::info;

use crate::domain::commit::{Commit, FileChange};
use crate::domain::week_group::{WeekGroup, group_by_week};
use crate::error::AppResult;
use crate::services::VersionControlService;

/// Fetches the latest `count` commits with their file changes and buckets
/// them by ISO week.
///
/// Detail requests run concurrently; the first failure aborts the batch.
pub async fn fetch_commits_grouped_by_week(
    version_control: &dyn VersionControlService,
    count: usize,
) -> AppResult<Vec<WeekGroup>> {
    let summaries = version_control.list_commits(count).await?;
    info!("Fetched {} commits, loading file changes", summaries.len());

    let commits = try_join_all(summaries.into_iter().map(|summary| async move {
        let files = version_control
            .commit_files(&summary.sha)
            .await?
            .into_iter()
            .map(FileChange::with_patch_policy)
            .collect();
        AppResult::Ok(Commit::from_summary(summary, files))
    }))
    .await?;

    let groups = group_by_week(commits);
    info!("Grouped commits into {} weeks", groups.len());
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};

    use crate::domain::commit::{CommitSummary, FileStatus};
    use crate::error::AppError;
    use crate::services::stub::StubRepository;

    fn summary(sha: &str, message: &str, date: &str) -> CommitSummary {
        CommitSummary {
            sha: sha.to_string(),
            message: message.to_string(),
            author: "Ada".to_string(),
            date: DateTime::parse_from_rfc3339(date)
                .expect("valid date")
                .with_timezone(&Utc),
        }
    }

    fn file(filename: &str, changes: u32) -> FileChange {
        FileChange {
            filename: filename.to_string(),
            status: FileStatus::Modified,
            additions: changes,
            deletions: 0,
            changes,
            patch: Some("@@ -1 +1 @@".to_string()),
        }
    }

    #[tokio::test]
    async fn groups_single_monday_commit() {
        let repo = StubRepository::default().with_commit(
            summary("abc", "Add login page", "2024-06-10T10:00:00Z"),
            vec![file("src/login.js", 40)],
        );

        let groups = fetch_commits_grouped_by_week(&repo, 10).await.expect("groups");

        assert_eq!(groups.len(), 1);
        let week = &groups[0];
        assert_eq!(week.week_key, "2024-W24");
        assert_eq!(week.week_start.to_string(), "2024-06-10");
        assert_eq!(week.week_end.to_string(), "2024-06-16");
        assert_eq!(week.commits[0].message, "Add login page");
        assert!(week.commits[0].files[0].patch.is_some());
    }

    #[tokio::test]
    async fn applies_patch_policy_to_fetched_files() {
        let repo = StubRepository::default().with_commit(
            summary("abc", "Update deps", "2024-06-10T10:00:00Z"),
            vec![
                file("src/small.rs", 49),
                file("src/large.rs", 50),
                file("pnpm-lock.yaml", 2),
                file("dist/app.js", 2),
            ],
        );

        let groups = fetch_commits_grouped_by_week(&repo, 10).await.expect("groups");
        let patches: Vec<bool> = groups[0].commits[0]
            .files
            .iter()
            .map(|f| f.patch.is_some())
            .collect();

        assert_eq!(patches, vec![true, false, false, false]);
    }

    #[tokio::test]
    async fn keeps_fetch_order_within_weeks() {
        let repo = StubRepository::default()
            .with_commit(summary("c3", "Third", "2024-06-12T10:00:00Z"), Vec::new())
            .with_commit(summary("p1", "Prior", "2024-06-05T10:00:00Z"), Vec::new())
            .with_commit(summary("c2", "Second", "2024-06-11T10:00:00Z"), Vec::new())
            .with_commit(summary("c1", "First", "2024-06-10T10:00:00Z"), Vec::new());

        let groups = fetch_commits_grouped_by_week(&repo, 10).await.expect("groups");

        assert_eq!(groups.len(), 2);
        let shas: Vec<&str> = groups[0].commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["c3", "c2", "c1"]);
        assert_eq!(groups[1].commits[0].sha, "p1");
    }

    #[tokio::test]
    async fn limits_to_requested_count() {
        let repo = StubRepository::default()
            .with_commit(summary("a", "A", "2024-06-12T10:00:00Z"), Vec::new())
            .with_commit(summary("b", "B", "2024-06-01T10:00:00Z"), Vec::new());

        let groups = fetch_commits_grouped_by_week(&repo, 1).await.expect("groups");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].commits.len(), 1);
    }

    #[tokio::test]
    async fn detail_failure_aborts_whole_batch() {
        let repo = StubRepository::default()
            .with_commit(summary("ok", "Fine", "2024-06-12T10:00:00Z"), Vec::new())
            .with_commit(summary("bad", "Broken", "2024-06-11T10:00:00Z"), Vec::new())
            .failing_on("bad");

        let err = fetch_commits_grouped_by_week(&repo, 10)
            .await
            .expect_err("fetch should fail");

        assert!(matches!(err, AppError::Fetch(message) if message.contains("bad")));
    }
}
