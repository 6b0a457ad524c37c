//! Error types surfaced by archive loading.
//!
//! Per-record timestamp failures and the texts/records consistency check never become
//! errors; they are recovered in place and only logged.

use std::path::PathBuf;

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum ExtractionError {
    #[error("no structured records found")]
    NoRecords,
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to read the file {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("File too large: {} ({size} bytes, max {max} bytes)", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("Failed to parse tweets.js file: {0}")]
    Extraction(#[from] ExtractionError),
}
