use super::content::ContentFilter;
use crate::models::RawRecord;

/// Apply a content filter to raw records, returning the survivors in order
///
/// Replies are removed first, then retweets. The retweet test looks at the raw, undecoded
/// text.
pub fn apply_filter(records: Vec<RawRecord>, filter: &ContentFilter) -> Vec<RawRecord> {
    if filter.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| !filter.excludes_reply(record))
        .filter(|record| !filter.excludes_retweet(record))
        .collect()
}
