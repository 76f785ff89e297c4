//! Outbound payload construction.

use url::form_urlencoded;

use crate::mapping::date::split_date;
use crate::mapping::entry_map::{DateGroup, EntryMap, MappingTarget};
use crate::relay::submission::Submission;

/// Control pairs the form service expects on every submission. Without them
/// it answers with a redirect back to the form instead of recording it.
pub const CONTROL_PAIRS: [(&str, &str); 3] = [("fvv", "1"), ("partialResponse", "[]"), ("pageHistory", "0")];

/// Ordered, key-unique list of form fields.
///
/// Setting a key that already exists replaces its value where it stands, so
/// the encoded order is the order in which keys were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundPayload {
    pairs: Vec<(String, String)>,
}

impl OutboundPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remap a submission through the entry map and append the control pairs.
    pub fn build(entry_map: &EntryMap, submission: &Submission) -> Self {
        let mut payload = Self::new();

        for entry in entry_map.iter() {
            let Some(target) = &entry.target else {
                continue;
            };

            match target {
                MappingTarget::SimpleField(key) => {
                    if let Some(value) = submission.field(&entry.label) {
                        payload.set(key, value);
                    }
                }
                MappingTarget::DateGroup(group) => {
                    if submission.has_value(&entry.label) {
                        let value = submission.field(&entry.label).unwrap_or_default();
                        payload.set_date(group, &value);
                    }
                }
            }
        }

        for (key, value) in CONTROL_PAIRS {
            payload.set(key, value);
        }

        payload
    }

    fn set_date(&mut self, group: &DateGroup, value: &str) {
        let split = split_date(value);
        let parts = [
            (&group.year_key, split.year),
            (&group.month_key, split.month),
            (&group.day_key, split.day),
        ];

        for (key, part) in parts {
            if let (Some(key), Some(part)) = (key, part) {
                if !part.is_empty() {
                    self.set(key, part);
                }
            }
        }
    }

    /// Insert or overwrite a key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as an `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(value: serde_json::Value) -> Submission {
        Submission::from_value(value)
    }

    fn map(raw: &str) -> EntryMap {
        EntryMap::from_json(raw).unwrap()
    }

    #[test]
    fn test_simple_field_is_copied_verbatim() {
        let payload = OutboundPayload::build(&map(r#"{"Name": "entry.1"}"#), &submission(json!({"Name": "Ada"})));
        assert_eq!(payload.get("entry.1"), Some("Ada"));
    }

    #[test]
    fn test_date_group_is_split() {
        let payload = OutboundPayload::build(
            &map(r#"{"DOB": {"year": "entry.2", "month": "entry.3", "day": "entry.4"}}"#),
            &submission(json!({"DOB": "2024-3-7"})),
        );
        assert_eq!(payload.get("entry.2"), Some("2024"));
        assert_eq!(payload.get("entry.3"), Some("3"));
        assert_eq!(payload.get("entry.4"), Some("7"));
    }

    #[test]
    fn test_unparseable_date_only_fills_month() {
        let payload = OutboundPayload::build(
            &map(r#"{"DOB": {"year": "entry.2", "month": "entry.3", "day": "entry.4"}}"#),
            &submission(json!({"DOB": "sometime in May"})),
        );
        assert_eq!(payload.get("entry.3"), Some("sometime in May"));
        assert!(!payload.contains_key("entry.2"));
        assert!(!payload.contains_key("entry.4"));
    }

    #[test]
    fn test_missing_date_contributes_nothing() {
        let payload = OutboundPayload::build(
            &map(r#"{"DOB": {"year": "entry.2", "month": "entry.3", "day": "entry.4"}}"#),
            &submission(json!({})),
        );
        assert_eq!(payload.len(), CONTROL_PAIRS.len());

        let dob = map(r#"{"DOB": {"year": "entry.2", "month": "entry.3", "day": "entry.4"}}"#);
        for blank in [json!(null), json!(""), json!(false), json!(0)] {
            let payload = OutboundPayload::build(&dob, &submission(json!({"DOB": blank})));
            assert_eq!(payload.len(), CONTROL_PAIRS.len(), "DOB = {blank}");
        }
    }

    #[test]
    fn test_control_pairs_always_present() {
        let payload = OutboundPayload::build(&EntryMap::default(), &submission(json!({"Name": "Ada"})));
        let pairs: Vec<(&str, &str)> = payload.iter().collect();
        assert_eq!(pairs, CONTROL_PAIRS.to_vec());
    }

    #[test]
    fn test_unmapped_and_skipped_labels_are_dropped() {
        let payload = OutboundPayload::build(
            &map(r#"{"Name": "entry.1", "Skip": null, "Absent": "entry.9"}"#),
            &submission(json!({"Name": "Ada", "Skip": "x", "Extra": "y"})),
        );
        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["entry.1", "fvv", "partialResponse", "pageHistory"]);
    }

    #[test]
    fn test_explicit_empty_value_is_forwarded() {
        let payload = OutboundPayload::build(&map(r#"{"Notes": "entry.7"}"#), &submission(json!({"Notes": ""})));
        assert_eq!(payload.get("entry.7"), Some(""));
    }

    #[test]
    fn test_duplicate_destination_overwrites_in_place() {
        let payload = OutboundPayload::build(
            &map(r#"{"First": "entry.1", "Second": "entry.2", "Third": "entry.1"}"#),
            &submission(json!({"First": "a", "Second": "b", "Third": "c"})),
        );
        let pairs: Vec<(&str, &str)> = payload.iter().take(2).collect();
        assert_eq!(pairs, vec![("entry.1", "c"), ("entry.2", "b")]);
    }

    #[test]
    fn test_encode_form_urlencoded() {
        let payload = OutboundPayload::build(
            &map(r#"{"Name": "entry.1", "Link": "entry.2"}"#),
            &submission(json!({"Name": "Ada Lovelace", "Link": "https://example.com/a?b=c&d"})),
        );
        assert_eq!(
            payload.encode(),
            "entry.1=Ada+Lovelace&entry.2=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc%26d\
             &fvv=1&partialResponse=%5B%5D&pageHistory=0"
        );
    }
}
