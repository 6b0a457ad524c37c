use serde::Deserialize;

/// Prefix that marks a post as a retweet. Native retweet flags are never consulted.
pub const RETWEET_PREFIX: &str = "RT ";

/// One element of the extracted archive array.
///
/// Newer exports wrap every post as `{"tweet": {...}}`, older ones list the fields directly.
/// A `tweet` key that does not hold an object falls through to the flat shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Wrapped { tweet: RawRecord },
    Flat(RawRecord),
}

impl RawItem {
    pub fn into_record(self) -> RawRecord {
        match self {
            RawItem::Wrapped { tweet } => tweet,
            RawItem::Flat(record) => record,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub full_text: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_post_id")]
    pub id_str: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_post_id")]
    pub id: Option<String>,
    /// Set when `in_reply_to_status_id_str` is present at all, whatever its value
    #[serde(
        default,
        rename = "in_reply_to_status_id_str",
        deserialize_with = "crate::parsers::deserializers::deserialize_presence"
    )]
    pub has_reply_parent: bool,
}

impl RawRecord {
    /// Undecoded post text: `full_text`, else `text`, else empty
    pub fn raw_text(&self) -> &str {
        first_non_empty(&self.full_text, &self.text)
    }

    /// Post identifier: `id_str`, else `id`, else empty
    pub fn post_id(&self) -> &str {
        first_non_empty(&self.id_str, &self.id)
    }

    pub fn created_at(&self) -> &str {
        self.created_at.as_deref().unwrap_or_default()
    }

    pub fn is_reply(&self) -> bool {
        self.has_reply_parent
    }

    pub fn is_retweet(&self) -> bool {
        self.raw_text().starts_with(RETWEET_PREFIX)
    }
}

fn first_non_empty<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> &'a str {
    [primary, fallback]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wrapped_item_unwraps_tweet() {
        let item: RawItem = serde_json::from_value(json!({
            "tweet": {"full_text": "hello", "id_str": "1", "created_at": "Wed Oct 10 20:19:24 +0000 2018"}
        }))
        .unwrap();
        let record = item.into_record();
        assert_eq!(record.raw_text(), "hello");
        assert_eq!(record.post_id(), "1");
        assert_eq!(record.created_at(), "Wed Oct 10 20:19:24 +0000 2018");
    }

    #[test]
    fn test_flat_item() {
        let item: RawItem = serde_json::from_value(json!({"text": "flat", "id": "9"})).unwrap();
        let record = item.into_record();
        assert_eq!(record.raw_text(), "flat");
        assert_eq!(record.post_id(), "9");
        assert_eq!(record.created_at(), "");
    }

    #[test]
    fn test_null_tweet_falls_back_to_flat() {
        let item: RawItem =
            serde_json::from_value(json!({"tweet": null, "full_text": "outer"})).unwrap();
        assert_eq!(item.into_record().raw_text(), "outer");
    }

    #[test]
    fn test_empty_full_text_falls_back_to_text() {
        let record: RawRecord =
            serde_json::from_value(json!({"full_text": "", "text": "short"})).unwrap();
        assert_eq!(record.raw_text(), "short");
    }

    #[test]
    fn test_numeric_id_is_rendered_as_string() {
        let record: RawRecord = serde_json::from_value(json!({"id": 1050118621198921728u64})).unwrap();
        assert_eq!(record.post_id(), "1050118621198921728");
    }

    #[test]
    fn test_reply_presence_includes_null() {
        let with_id: RawRecord =
            serde_json::from_value(json!({"in_reply_to_status_id_str": "42"})).unwrap();
        let with_null: RawRecord =
            serde_json::from_value(json!({"in_reply_to_status_id_str": null})).unwrap();
        let without: RawRecord = serde_json::from_value(json!({"full_text": "x"})).unwrap();

        assert!(with_id.is_reply());
        assert!(with_null.is_reply());
        assert!(!without.is_reply());
    }

    #[test]
    fn test_retweet_prefix_is_case_and_space_sensitive() {
        let retweet: RawRecord = serde_json::from_value(json!({"full_text": "RT @a: hi"})).unwrap();
        let lowercase: RawRecord = serde_json::from_value(json!({"full_text": "rt @a: hi"})).unwrap();
        let no_space: RawRecord = serde_json::from_value(json!({"full_text": "RT@a"})).unwrap();

        assert!(retweet.is_retweet());
        assert!(!lowercase.is_retweet());
        assert!(!no_space.is_retweet());
    }
}
