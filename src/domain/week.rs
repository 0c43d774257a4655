use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Returns the `<ISO year>-W<week>` key of the week containing `timestamp`.
///
/// The ISO year is the calendar year of the week's Thursday, so Dec 29-31 can
/// land in week 1 of the next year and Jan 1-3 in week 52 or 53 of the last.
pub fn iso_week_key(timestamp: DateTime<Utc>) -> String {
    let thursday = week_thursday(timestamp.date_naive());
    // The first Thursday falls on one of the first seven days of the ISO year,
    // so its zero-based ordinal is the Thursday's ordinal modulo 7.
    let first_thursday = thursday.ordinal0() % 7;
    let week = 1 + (thursday.ordinal0() - first_thursday) / 7;
    format!("{}-W{:02}", thursday.year(), week)
}

/// Monday of the ISO week containing `timestamp`.
pub fn week_start(timestamp: DateTime<Utc>) -> NaiveDate {
    let date = timestamp.date_naive();
    date - Duration::days(days_since_monday(date))
}

/// Sunday of the ISO week containing `timestamp`.
pub fn week_end(timestamp: DateTime<Utc>) -> NaiveDate {
    week_start(timestamp) + Duration::days(6)
}

/// Calendar bounds of a single ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekSpan {
    pub fn containing(timestamp: DateTime<Utc>) -> Self {
        Self {
            start: week_start(timestamp),
            end: week_end(timestamp),
        }
    }
}

#[cfg(test)]
impl WeekSpan {
    /// Monday 00:00:00.000 UTC.
    pub fn first_instant(&self) -> DateTime<Utc> {
        self.start.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Sunday 23:59:59.999 UTC.
    pub fn last_instant(&self) -> DateTime<Utc> {
        (self.end + Duration::days(1)).and_time(chrono::NaiveTime::MIN).and_utc()
            - Duration::milliseconds(1)
    }
}

fn days_since_monday(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_monday())
}

fn week_thursday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(days_since_monday(date)) + Duration::days(3)
}
