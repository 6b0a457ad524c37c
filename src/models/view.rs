use super::record::Record;

/// Archive contents after retweet/reply filtering.
///
/// `texts[i]` is always the text of `records[i]`. The normalizer builds both sequences in
/// lockstep and logs if they ever diverge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub texts: Vec<String>,
    pub records: Vec<Record>,
}

impl FilteredView {
    pub fn push(&mut self, record: Record) {
        self.texts.push(record.text.clone());
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn is_consistent(&self) -> bool {
        self.texts.len() == self.records.len()
    }

    pub fn retweet_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_retweet).count()
    }

    pub fn reply_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_reply).count()
    }

    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_timestamp()).count()
    }
}
