use chrono::NaiveDate;

use crate::domain::commit::Commit;
use crate::domain::week::{WeekSpan, iso_week_key};

/// Commits whose author date falls in one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGroup {
    pub week_key: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub commits: Vec<Commit>,
}

impl WeekGroup {
    fn open(week_key: String, first: Commit) -> Self {
        let span = WeekSpan::containing(first.date);
        Self {
            week_key,
            week_start: span.start,
            week_end: span.end,
            commits: vec![first],
        }
    }
}

/// Buckets commits by ISO week.
///
/// Groups appear in the order their week was first seen, and commits keep
/// their input order inside each group.
pub fn group_by_week(commits: Vec<Commit>) -> Vec<WeekGroup> {
    let mut groups: Vec<WeekGroup> = Vec::new();
    for commit in commits {
        let key = iso_week_key(commit.date);
        match groups.iter_mut().find(|group| group.week_key == key) {
            Some(group) => group.commits.push(commit),
            None => groups.push(WeekGroup::open(key, commit)),
        }
    }
    groups
}
