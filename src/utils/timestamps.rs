use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Relative age of a post: "just now", "45m ago", "3h ago", "5d ago", "2mo ago", "3y ago"
pub fn format_relative(timestamp: &DateTime<Utc>) -> String {
    format_relative_at(timestamp, &Utc::now())
}

/// [`format_relative`] against an explicit current time
pub fn format_relative_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(*timestamp).num_seconds();
    let span = compact_span(seconds.abs());

    match span {
        None => "just now".to_string(),
        Some(span) if seconds < 0 => format!("in {}", span),
        Some(span) => format!("{} ago", span),
    }
}

fn compact_span(seconds: i64) -> Option<String> {
    let minutes = seconds / SECONDS_PER_MINUTE;
    let hours = seconds / SECONDS_PER_HOUR;
    let days = seconds / SECONDS_PER_DAY;

    if days >= DAYS_PER_YEAR {
        Some(format!("{}y", days / DAYS_PER_YEAR))
    } else if days >= DAYS_PER_MONTH {
        Some(format!("{}mo", days / DAYS_PER_MONTH))
    } else if days > 0 {
        Some(format!("{}d", days))
    } else if hours > 0 {
        Some(format!("{}h", hours))
    } else if minutes > 0 {
        Some(format!("{}m", minutes))
    } else {
        None
    }
}

/// Calendar date of a post: "Oct 10, 2018"
pub fn format_absolute(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}
