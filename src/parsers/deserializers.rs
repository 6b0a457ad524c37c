use chrono::{DateTime, ParseError, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `created_at` layout used by tweets.js exports: `Wed Oct 10 20:19:24 +0000 2018`
const TWITTER_CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Custom deserializer that keeps string values and maps anything else to `None`
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Custom deserializer for post ids that accepts both strings and integers
pub fn deserialize_post_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// Custom deserializer that only records that the field was present, even as `null`
pub fn deserialize_presence<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

/// Parse a post timestamp, trying the Twitter export layout, then RFC 2822, then RFC 3339.
///
/// Returns the error from the Twitter layout attempt when nothing matches.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TWITTER_CREATED_AT_FORMAT)
        .or_else(|e| DateTime::parse_from_rfc2822(raw).map_err(|_| e))
        .or_else(|e| DateTime::parse_from_rfc3339(raw).map_err(|_| e))
        .map(|dt| dt.with_timezone(&Utc))
}
