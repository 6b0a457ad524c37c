//! Plain-text and JSON rendering of selections and archive statistics.
//!
//! Everything that originates from the archive passes through
//! [`sanitize_for_terminal`](crate::utils::sanitize_for_terminal) before it is printed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{FilteredView, Histogram, Record};
use crate::sampler::{Selection, Strategy};
use crate::utils::{format_absolute, format_relative_at, sanitize_for_terminal};

pub const NO_MATCHES_MESSAGE: &str = "No posts match your current filters. Try changing the filters or loading a different file.";
const UNKNOWN_DATE: &str = "unknown date";
const HISTOGRAM_BAR_WIDTH: usize = 40;

/// JSON shape of one drawn post
#[derive(Debug, Serialize)]
pub struct SelectionOutput<'a> {
    pub index: usize,
    pub text: &'a str,
    pub id: Option<&'a str>,
    pub created_at: Option<&'a str>,
    pub timestamp: Option<DateTime<Utc>>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub is_retweet: bool,
    pub is_reply: bool,
    pub relative: Option<String>,
    pub absolute: Option<String>,
}

impl<'a> SelectionOutput<'a> {
    pub fn new(selection: &'a Selection, now: &DateTime<Utc>) -> Self {
        let record = selection.record.as_ref();
        let timestamp = record.and_then(|r| r.timestamp);
        Self {
            index: selection.index,
            text: &selection.text,
            id: record.map(|r| r.id.as_str()),
            created_at: record.map(|r| r.created_at_raw.as_str()),
            timestamp,
            year: record.and_then(Record::year),
            month: record.and_then(Record::month),
            is_retweet: record.is_some_and(|r| r.is_retweet),
            is_reply: record.is_some_and(|r| r.is_reply),
            relative: timestamp.map(|ts| format_relative_at(&ts, now)),
            absolute: timestamp.map(|ts| format_absolute(&ts)),
        }
    }
}

/// JSON printed by `show --json` when the filters leave no posts
#[derive(Debug, Serialize)]
pub struct NoMatchesOutput {
    pub error: &'static str,
    pub message: &'static str,
}

impl Default for NoMatchesOutput {
    fn default() -> Self {
        Self { error: "no_matches", message: NO_MATCHES_MESSAGE }
    }
}

/// JSON shape of the `stats` command
#[derive(Debug, Serialize)]
pub struct StatsOutput<'a> {
    pub total: usize,
    pub retweets: usize,
    pub replies: usize,
    pub undated: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
    pub histogram: &'a Histogram,
}

impl<'a> StatsOutput<'a> {
    pub fn new(view: &FilteredView, histogram: &'a Histogram) -> Self {
        let (oldest, newest) = date_range(view);
        Self {
            total: view.len(),
            retweets: view.retweet_count(),
            replies: view.reply_count(),
            undated: view.undated_count(),
            oldest,
            newest,
            histogram,
        }
    }
}

pub fn render_header(total: usize, strategy: Strategy) -> String {
    format!("Showing 1 of {} posts from your archive ({})", total, strategy.label())
}

/// Post text followed by its date and badges
pub fn render_selection(selection: &Selection, now: &DateTime<Utc>) -> String {
    let text = sanitize_for_terminal(&selection.text);
    match &selection.record {
        Some(record) => format!("{}\n\n{}", text, render_meta_line(record, now)),
        None => text,
    }
}

/// "3y ago (Oct 10, 2018) · Retweet · Reply"
pub fn render_meta_line(record: &Record, now: &DateTime<Utc>) -> String {
    let mut parts = vec![match &record.timestamp {
        Some(ts) => format!("{} ({})", format_relative_at(ts, now), format_absolute(ts)),
        None => UNKNOWN_DATE.to_string(),
    }];
    if record.is_retweet {
        parts.push("Retweet".to_string());
    }
    if record.is_reply {
        parts.push("Reply".to_string());
    }
    parts.join(" · ")
}

pub fn render_stats(stats: &StatsOutput<'_>, archive_label: &str) -> String {
    let mut lines = vec![
        "Archive Statistics".to_string(),
        "==================".to_string(),
        format!("Archive: {}", archive_label),
        format!("Total posts: {}", stats.total),
        format!("  Retweets: {}", stats.retweets),
        format!("  Replies: {}", stats.replies),
        format!("  Without date: {}", stats.undated),
    ];

    if let Some(oldest) = stats.oldest {
        lines.push(format!("Oldest post: {}", oldest.format("%Y-%m-%d %H:%M:%S")));
    }
    if let Some(newest) = stats.newest {
        lines.push(format!("Newest post: {}", newest.format("%Y-%m-%d %H:%M:%S")));
    }

    if !stats.histogram.is_empty() {
        lines.push(String::new());
        lines.push("Posts per year:".to_string());
        let peak = stats.histogram.year_counts.values().copied().max().unwrap_or(1);
        for (year, count) in &stats.histogram.year_counts {
            let width = (count * HISTOGRAM_BAR_WIDTH).div_ceil(peak);
            lines.push(format!("  {}  {} {}", year, "#".repeat(width), count));
        }
    }

    lines.join("\n")
}

fn date_range(view: &FilteredView) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let dates = view.records.iter().filter_map(|r| r.timestamp);
    let oldest = dates.clone().min();
    let newest = dates.max();
    (oldest, newest)
}
