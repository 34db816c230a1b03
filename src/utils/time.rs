use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole days between two instants, floored. Partial days never round up.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().abs() / SECONDS_PER_DAY
}

/// Compares local year/month/day in `tz`, not a rolling 24h window.
pub fn is_same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: &Tz) -> bool {
    a.with_timezone(tz).date_naive() == b.with_timezone(tz).date_naive()
}

/// Local midnight of the day containing `now`, as a UTC instant.
pub fn start_of_day(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    // Midnight can fall inside a DST gap; the earliest valid instant of the
    // day is then the first one after the gap.
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => tz
            .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| now.with_timezone(&Utc)),
    }
}

/// Human phrasing for the time since an event was last logged.
pub fn relative_phrase(days: Option<i64>) -> &'static str {
    match days {
        None => "never logged",
        Some(0) => "today",
        Some(1) => "yesterday",
        Some(2..=6) => "a few days ago",
        Some(7..=13) => "about a week ago",
        Some(14..=27) => "a couple of weeks ago",
        Some(28..=59) => "about a month ago",
        Some(60..=364) => "several months ago",
        Some(_) => "over a year ago",
    }
}
