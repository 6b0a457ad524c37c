use crate::models::RawRecord;

/// Which kinds of posts to exclude from the view
///
/// The two predicates are independent: replies are detected by the presence of a
/// reply-parent id, retweets by the `"RT "` text prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub hide_retweets: bool,
    pub hide_replies: bool,
}

impl ContentFilter {
    pub fn new(hide_retweets: bool, hide_replies: bool) -> Self {
        Self { hide_retweets, hide_replies }
    }

    pub fn toggled_retweets(self) -> Self {
        Self { hide_retweets: !self.hide_retweets, ..self }
    }

    pub fn toggled_replies(self) -> Self {
        Self { hide_replies: !self.hide_replies, ..self }
    }

    pub fn is_empty(&self) -> bool {
        !self.hide_retweets && !self.hide_replies
    }

    pub fn excludes_reply(&self, record: &RawRecord) -> bool {
        self.hide_replies && record.is_reply()
    }

    pub fn excludes_retweet(&self, record: &RawRecord) -> bool {
        self.hide_retweets && record.is_retweet()
    }
}
