//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for tweets.js archive files in a temp directory
pub struct ArchiveBuilder {
    temp_dir: TempDir,
    tweets: Vec<TweetBuilder>,
    assignment: Option<String>,
    wrapped: bool,
}

impl ArchiveBuilder {
    /// Empty archive written as `window.YTD.tweets.part0 = [...]` with wrapped items
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            tweets: Vec::new(),
            assignment: Some("window.YTD.tweets.part0".to_string()),
            wrapped: true,
        }
    }

    pub fn with_tweet(mut self, tweet: TweetBuilder) -> Self {
        self.tweets.push(tweet);
        self
    }

    pub fn with_tweets(mut self, tweets: impl IntoIterator<Item = TweetBuilder>) -> Self {
        self.tweets.extend(tweets);
        self
    }

    /// Write a bare JSON array instead of a JavaScript assignment
    pub fn plain_json(mut self) -> Self {
        self.assignment = None;
        self
    }

    /// Write flat tweet objects instead of `{"tweet": {...}}` wrappers
    pub fn flat(mut self) -> Self {
        self.wrapped = false;
        self
    }

    pub fn to_text(&self) -> String {
        let items: Vec<Value> = self
            .tweets
            .iter()
            .map(|t| if self.wrapped { json!({ "tweet": t.to_json() }) } else { t.to_json() })
            .collect();
        let array = serde_json::to_string_pretty(&items).expect("Failed to serialize tweets");
        match &self.assignment {
            Some(name) => format!("{} = {}", name, array),
            None => array,
        }
    }

    /// Write `tweets.js` and return the temp dir with its path
    pub fn build(self) -> (TempDir, PathBuf) {
        let text = self.to_text();
        let path = self.temp_dir.path().join("tweets.js");
        fs::write(&path, text).expect("Failed to write tweets.js");
        (self.temp_dir, path)
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single tweet object
#[derive(Clone)]
pub struct TweetBuilder {
    full_text: Option<String>,
    text: Option<String>,
    created_at: Option<String>,
    id_str: Option<String>,
    reply_to: Option<Value>,
}

impl TweetBuilder {
    pub fn new(text: &str) -> Self {
        Self {
            full_text: Some(text.to_string()),
            text: None,
            created_at: None,
            id_str: None,
            reply_to: None,
        }
    }

    /// Tweet dated at the given year, month (1-based), and day, at noon UTC
    pub fn dated(text: &str, year: i32, month: u32, day: u32) -> Self {
        Self::new(text).with_created_at(&created_at(year, month, day))
    }

    pub fn with_created_at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.to_string());
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id_str = Some(id.to_string());
        self
    }

    /// Use the legacy `text` field instead of `full_text`
    pub fn legacy_text(mut self) -> Self {
        self.text = self.full_text.take();
        self
    }

    pub fn reply_to(mut self, parent: &str) -> Self {
        self.reply_to = Some(Value::String(parent.to_string()));
        self
    }

    pub fn to_json(&self) -> Value {
        let mut object = serde_json::Map::new();
        if let Some(full_text) = &self.full_text {
            object.insert("full_text".to_string(), json!(full_text));
        }
        if let Some(text) = &self.text {
            object.insert("text".to_string(), json!(text));
        }
        if let Some(created_at) = &self.created_at {
            object.insert("created_at".to_string(), json!(created_at));
        }
        if let Some(id_str) = &self.id_str {
            object.insert("id_str".to_string(), json!(id_str));
        }
        if let Some(reply_to) = &self.reply_to {
            object.insert("in_reply_to_status_id_str".to_string(), reply_to.clone());
        }
        Value::Object(object)
    }
}

/// Twitter-style `created_at` for noon UTC on the given day
pub fn created_at(year: i32, month: u32, day: u32) -> String {
    let date = chrono::NaiveDate::from_ymd_opt(year, month, day).expect("Invalid test date");
    format!("{} 12:00:00 +0000 {}", date.format("%a %b %d"), year)
}

/// One dated post per month for the given years, ids counting up from 1
pub fn monthly_tweets(years: std::ops::RangeInclusive<i32>) -> Vec<TweetBuilder> {
    let mut id = 0;
    years
        .flat_map(|year| (1..=12).map(move |month| (year, month)))
        .map(|(year, month)| {
            id += 1;
            TweetBuilder::dated(&format!("post {}-{:02}", year, month), year, month, 1)
                .with_id(&id.to_string())
        })
        .collect()
}

pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}
