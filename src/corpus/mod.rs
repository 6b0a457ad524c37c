//! Loaded archive and its normalization into views.
//!
//! A [`Corpus`] keeps the extracted archive exactly as parsed, so changing filters only
//! re-runs normalization, never extraction. It is replaced wholesale when a new archive
//! is loaded and is never mutated.

pub mod normalize;

use serde_json::Value;

pub use normalize::{normalize, normalize_record};

use crate::error::ExtractionError;
use crate::filters::ContentFilter;
use crate::models::FilteredView;
use crate::parsers::extractor::{PART_KEY, extract};

#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    archive: Value,
}

impl Corpus {
    /// Extract a corpus from raw archive text
    pub fn from_text(text: &str) -> Result<Self, ExtractionError> {
        extract(text).map(|archive| Self { archive })
    }

    /// Wrap an already-extracted archive value
    pub fn from_value(archive: Value) -> Self {
        Self { archive }
    }

    pub fn archive(&self) -> &Value {
        &self.archive
    }

    /// Number of raw items, before filtering and before empty-text items are dropped
    pub fn raw_len(&self) -> usize {
        match &self.archive {
            Value::Array(items) => items.len(),
            other => other.get(PART_KEY).and_then(Value::as_array).map_or(0, Vec::len),
        }
    }

    pub fn view(&self, filter: &ContentFilter) -> FilteredView {
        normalize(&self.archive, filter)
    }
}
