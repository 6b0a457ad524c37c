//! Pulls the record array out of a raw archive file.
//!
//! `tweets.js` is not JSON: it is a JavaScript statement of the form
//! `window.YTD.tweets.part0 = [ ... ]`. Three methods are tried in order and the first one
//! that yields a non-empty array wins:
//!
//! 1. Scan for an array-of-objects literal `[ { ... } ]` and parse it
//! 2. Strip the `identifier(.identifier)* =` assignment prefix and trailing `;`, then parse
//! 3. Parse everything between the first `[` and the last `]`
//!
//! Results are never merged across methods.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ExtractionError;

/// Key under which the extracted array is stored, mirroring the export's `part0` naming
pub const PART_KEY: &str = "part0";

static ARRAY_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[\s*\{.+\}\s*\]").expect("array literal pattern is valid")
});
static ASSIGNMENT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z_$][A-Za-z0-9_$]*(?:\s*\.\s*[A-Za-z_$][A-Za-z0-9_$]*)*\s*=")
        .expect("assignment prefix pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    ArrayLiteral,
    AssignmentStrip,
    BracketScan,
}

impl ExtractionMethod {
    pub const ALL: [ExtractionMethod; 3] =
        [ExtractionMethod::ArrayLiteral, ExtractionMethod::AssignmentStrip, ExtractionMethod::BracketScan];

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        match self {
            ExtractionMethod::ArrayLiteral => find_array_literal(text),
            ExtractionMethod::AssignmentStrip => strip_assignment(text),
            ExtractionMethod::BracketScan => bracket_span(text),
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionMethod::ArrayLiteral => "array literal",
            ExtractionMethod::AssignmentStrip => "assignment strip",
            ExtractionMethod::BracketScan => "bracket scan",
        };
        f.write_str(name)
    }
}

/// Extract the record array from archive text, wrapped as `{"part0": [...]}`
///
/// # Errors
///
/// Returns [`ExtractionError::NoRecords`] if no method finds a non-empty JSON array.
pub fn extract(text: &str) -> Result<Value, ExtractionError> {
    extract_with_method(text).map(|(archive, _)| archive)
}

/// Like [`extract`], also reporting which method succeeded
pub fn extract_with_method(text: &str) -> Result<(Value, ExtractionMethod), ExtractionError> {
    let text = text.trim_start_matches('\u{feff}');

    for method in ExtractionMethod::ALL {
        let Some(candidate) = method.candidate(text) else {
            debug!("Extraction via {} found no candidate", method);
            continue;
        };

        match parse_record_array(candidate) {
            Ok(records) => {
                info!("Extracted {} raw records via {}", records.len(), method);
                let mut wrapped = Map::new();
                wrapped.insert(PART_KEY.to_string(), Value::Array(records));
                return Ok((Value::Object(wrapped), method));
            }
            Err(reason) => debug!("Extraction via {} failed: {}", method, reason),
        }
    }

    Err(ExtractionError::NoRecords)
}

fn parse_record_array(candidate: &str) -> Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(items)) if !items.is_empty() => Ok(items),
        Ok(Value::Array(_)) => Err("array is empty".to_string()),
        Ok(_) => Err("parsed value is not an array".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn find_array_literal(text: &str) -> Option<&str> {
    ARRAY_LITERAL_RE.find(text).map(|m| m.as_str())
}

fn strip_assignment(text: &str) -> Option<&str> {
    let prefix = ASSIGNMENT_PREFIX_RE.find(text)?;
    let body = text[prefix.end()..].trim();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    Some(body)
}

fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}
