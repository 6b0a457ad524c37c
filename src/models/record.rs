use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Serialize, Serializer};

use super::raw::RETWEET_PREFIX;

/// Calendar bucket of a post: year plus zero-based month (0 = January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_timestamp(timestamp: &DateTime<Utc>) -> Self {
        Self { year: timestamp.year(), month: timestamp.month0() }
    }
}

/// Renders as `"year-month"`, e.g. `"2021-0"` for January 2021
impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized post. Year and month are derived from `timestamp`, so they are either both
/// present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub text: String,
    pub id: String,
    pub created_at_raw: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub is_retweet: bool,
    pub is_reply: bool,
}

impl Record {
    /// Build a record from already-decoded text. Retweet classification is a literal
    /// `"RT "` prefix test on that text.
    pub fn new(
        text: String,
        id: String,
        created_at_raw: String,
        timestamp: Option<DateTime<Utc>>,
        is_reply: bool,
    ) -> Self {
        let is_retweet = text.starts_with(RETWEET_PREFIX);
        Self { text, id, created_at_raw, timestamp, is_retweet, is_reply }
    }

    pub fn period(&self) -> Option<YearMonth> {
        self.timestamp.as_ref().map(YearMonth::from_timestamp)
    }

    pub fn year(&self) -> Option<i32> {
        self.period().map(|p| p.year)
    }

    /// Zero-based month (0..=11)
    pub fn month(&self) -> Option<u32> {
        self.period().map(|p| p.month)
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}
