//! Normalizer: extracted archive → filtered, decoded, classified records.
//!
//! # Error Handling Strategy
//!
//! Normalization never fails; it degrades per item:
//!
//! - **Unexpected archive shape**: Anything other than `{"part0": [...]}` or a bare array
//!   is logged and yields an empty view.
//! - **Unusable items**: Non-object elements, and objects serde cannot read, are logged and
//!   skipped. Items with no text are dropped silently.
//! - **Bad timestamps**: An empty or unparsable `created_at` leaves the record undated; the
//!   record is kept and the parse failure is logged at debug level.
//! - **Consistency check**: The texts/records sequences must stay parallel; a mismatch is
//!   logged as an error, never raised.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::filters::{ContentFilter, apply_filter};
use crate::models::{FilteredView, RawItem, RawRecord, Record};
use crate::parsers::extractor::PART_KEY;
use crate::parsers::parse_created_at;
use crate::utils::decode_entities;

/// Build the filtered view of an extracted archive
///
/// Accepts either the extractor's `{"part0": [...]}` wrapper or a bare array. Items may be
/// wrapped one level deeper under a `tweet` key.
///
/// # Examples
///
/// ```
/// use archive_sampler::corpus::normalize;
/// use archive_sampler::filters::ContentFilter;
/// use serde_json::json;
///
/// let archive = json!({"part0": [
///     {"tweet": {"full_text": "Fish &amp; chips", "created_at": "Wed Oct 10 20:19:24 +0000 2018"}},
///     {"tweet": {"full_text": "RT @pal: look"}},
/// ]});
///
/// let view = normalize(&archive, &ContentFilter::new(true, false));
/// assert_eq!(view.texts, vec!["Fish & chips"]);
/// assert_eq!(view.records[0].year(), Some(2018));
/// ```
pub fn normalize(wrapped: &Value, filter: &ContentFilter) -> FilteredView {
    let Some(items) = unwrap_items(wrapped) else {
        warn!("Unexpected archive structure: expected an array or an object with `{}`", PART_KEY);
        return FilteredView::default();
    };

    let raw_records = read_raw_records(items);
    let total = raw_records.len();
    let survivors = apply_filter(raw_records, filter);
    let filtered_out = total - survivors.len();

    let mut view = FilteredView::default();
    let mut undated = 0;

    for raw in survivors {
        let Some(record) = normalize_record(&raw) else {
            continue;
        };
        if !record.has_timestamp() {
            undated += 1;
        }
        view.push(record);
    }

    if !view.is_consistent() {
        error!(
            "Mismatch between text and record counts ({} texts, {} records)",
            view.texts.len(),
            view.records.len()
        );
    }

    debug!(
        "Normalized {} records ({} filtered out, {} without a date)",
        view.len(),
        filtered_out,
        undated
    );

    view
}

/// Turn one raw record into a [`Record`], or `None` if it has no text
pub fn normalize_record(raw: &RawRecord) -> Option<Record> {
    let raw_text = raw.raw_text();
    if raw_text.is_empty() {
        return None;
    }

    let created_at_raw = raw.created_at().to_string();
    let timestamp = parse_timestamp(&created_at_raw, raw.post_id());

    Some(Record::new(
        decode_entities(raw_text),
        raw.post_id().to_string(),
        created_at_raw,
        timestamp,
        raw.is_reply(),
    ))
}

fn parse_timestamp(created_at: &str, id: &str) -> Option<DateTime<Utc>> {
    if created_at.is_empty() {
        return None;
    }

    match parse_created_at(created_at) {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            debug!("Failed to parse date {:?} of post {:?}: {}", created_at, id, e);
            None
        }
    }
}

fn unwrap_items(wrapped: &Value) -> Option<&Vec<Value>> {
    match wrapped {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get(PART_KEY).and_then(Value::as_array),
        _ => None,
    }
}

fn read_raw_records(items: &[Value]) -> Vec<RawRecord> {
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            warn!("Skipping archive item {}: not an object", index);
            skipped += 1;
            continue;
        }

        match RawItem::deserialize(item) {
            Ok(raw) => records.push(raw.into_record()),
            Err(e) => {
                warn!("Skipping archive item {}: {}", index, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Read {} archive items ({} skipped)", records.len(), skipped);
    }

    records
}
