//! Typed views of the store's `_status` and `_search` responses.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TailError};

/// Body of `GET /_status`. Only the index names are read.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Index name to (ignored) index metadata. Required: error bodies lack it.
    pub indices: BTreeMap<String, IgnoredAny>,
}

impl StatusResponse {
    /// Returns the discovered index names.
    pub fn index_names(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(String::as_str)
    }
}

/// Body of `POST /<index>/_search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Outer hits envelope.
    pub hits: HitsEnvelope,
}

/// The `hits` object of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct HitsEnvelope {
    /// Returned documents, in store order.
    pub hits: Vec<Hit>,
}

/// One returned document with its projected fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Hit {
    /// Projected fields. The store returns every field as an array.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<Value>>,
}

impl Hit {
    /// Returns the first projected value of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::MissingField`] if the field is absent or empty.
    pub fn first(&self, field: &str) -> Result<&Value> {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .ok_or_else(|| TailError::MissingField(field.to_string()))
    }

    /// Returns the first projected value of `field` as a string.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::MissingField`] if absent, or
    /// [`TailError::InvalidTimestamp`] if the value is not a string.
    pub fn timestamp(&self, field: &str) -> Result<&str> {
        let value = self.first(field)?;
        value.as_str().ok_or_else(|| TailError::InvalidTimestamp {
            value: value.to_string(),
            message: "not a string".into(),
        })
    }
}

/// Renders a projected message value: strings raw, anything else as JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_lists_index_names() {
        let status: StatusResponse = serde_json::from_str(
            r#"{"_shards":{"total":2},"indices":{"logstash-2021.01.01":{"docs":{}},"kibana-int":{}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = status.index_names().collect();
        assert_eq!(names, vec!["kibana-int", "logstash-2021.01.01"]);
    }

    #[test]
    fn status_with_empty_indices_is_empty() {
        let status: StatusResponse = serde_json::from_str(r#"{"indices":{}}"#).unwrap();
        assert_eq!(status.index_names().count(), 0);
    }

    #[test]
    fn error_body_is_not_a_status() {
        let result = serde_json::from_str::<StatusResponse>(
            r#"{"error":"no handler found for uri [/_status] and method [GET]","status":400}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn hits_envelope_without_hits_array_is_error() {
        let result = serde_json::from_str::<SearchResponse>(r#"{"hits":{"total":5}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn search_response_decodes_hits_in_order() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "took": 3,
            "hits": {
                "total": 2,
                "hits": [
                    {"_id": "a", "fields": {"@timestamp": ["t2"], "@message": ["second"]}},
                    {"_id": "b", "fields": {"@timestamp": ["t1"], "@message": ["first"]}},
                ]
            }
        }))
        .unwrap();

        assert_eq!(resp.hits.hits.len(), 2);
        assert_eq!(resp.hits.hits[0].timestamp("@timestamp").unwrap(), "t2");
        assert_eq!(resp.hits.hits[1].timestamp("@timestamp").unwrap(), "t1");
    }

    #[test]
    fn search_response_without_hits_is_error() {
        let result: std::result::Result<SearchResponse, _> =
            serde_json::from_value(json!({"took": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn first_uses_first_element_only() {
        let hit: Hit = serde_json::from_value(json!({
            "fields": {"@message": ["one", "two"]}
        }))
        .unwrap();
        assert_eq!(hit.first("@message").unwrap(), &json!("one"));
    }

    #[test]
    fn missing_or_empty_field_is_error() {
        let hit: Hit = serde_json::from_value(json!({
            "fields": {"@message": []}
        }))
        .unwrap();
        assert!(matches!(hit.first("@message"), Err(TailError::MissingField(ref f)) if f == "@message"));
        assert!(matches!(hit.first("@timestamp"), Err(TailError::MissingField(_))));
    }

    #[test]
    fn non_string_timestamp_is_error() {
        let hit: Hit = serde_json::from_value(json!({
            "fields": {"@timestamp": [1_609_459_200_000_i64]}
        }))
        .unwrap();
        assert!(matches!(
            hit.timestamp("@timestamp"),
            Err(TailError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn display_value_renders_strings_raw() {
        assert_eq!(display_value(&json!("hello")), "hello");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
