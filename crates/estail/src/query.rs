//! Search request construction.
//!
//! A poll asks for documents whose timestamp is strictly after the cursor and
//! that do not match the [`ExclusionFilter`]:
//!
//! ```json
//! {
//!   "filter": {"and": [
//!     {"range": {"@timestamp": {"gt": "2021-01-01T00:00:00.000000000Z"}}},
//!     {"not": {"or": [{"terms": {"level": ["debug"]}}]}}
//!   ]},
//!   "size": 1000,
//!   "fields": ["@message", "@timestamp"]
//! }
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::{Result, TailError};
use crate::timestamp::format_cursor;

/// Field/value pairs whose documents are dropped from every poll.
///
/// Parsed from `field:value,field:value`. A field listed twice keeps only its
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionFilter {
    terms: BTreeMap<String, String>,
}

impl ExclusionFilter {
    /// Creates a filter that excludes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of `field:value` pairs.
    ///
    /// An empty string yields an empty filter. Each pair is split at its first
    /// `:`, so values may themselves contain colons.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::InvalidExclusion`] for a pair without a `:` or with
    /// an empty field name.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut terms = BTreeMap::new();
        if spec.is_empty() {
            return Ok(Self { terms });
        }

        for pair in spec.split(',') {
            let Some((field, value)) = pair.split_once(':') else {
                return Err(TailError::InvalidExclusion {
                    pair: pair.to_string(),
                    reason: "expected field:value",
                });
            };
            if field.is_empty() {
                return Err(TailError::InvalidExclusion {
                    pair: pair.to_string(),
                    reason: "field name is empty",
                });
            }
            terms.insert(field.to_string(), value.to_string());
        }

        Ok(Self { terms })
    }

    /// Returns true if no pairs are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of excluded fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns the excluded value for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.terms.get(field).map(String::as_str)
    }

    /// Renders the filter clause.
    ///
    /// Empty filters match everything; otherwise the clause is the negation of
    /// an OR over one `terms` clause per field.
    #[must_use]
    pub fn to_clause(&self) -> Value {
        if self.terms.is_empty() {
            return json!({ "match_all": {} });
        }

        let terms: Vec<Value> = self
            .terms
            .iter()
            .map(|(field, value)| json!({ "terms": { field: [value] } }))
            .collect();

        json!({ "not": { "or": terms } })
    }
}

impl FromStr for ExclusionFilter {
    type Err = TailError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Builds the body of one poll's search request.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    timestamp_field: &'a str,
    message_field: &'a str,
    exclusion: &'a ExclusionFilter,
    size: usize,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder over the configured fields and filter.
    #[must_use]
    pub const fn new(
        timestamp_field: &'a str,
        message_field: &'a str,
        exclusion: &'a ExclusionFilter,
        size: usize,
    ) -> Self {
        Self {
            timestamp_field,
            message_field,
            exclusion,
            size,
        }
    }

    /// Builds the request for documents strictly newer than `cursor`.
    #[must_use]
    pub fn build(&self, cursor: &DateTime<Utc>) -> Value {
        json!({
            "filter": {
                "and": [
                    { "range": { self.timestamp_field: { "gt": format_cursor(cursor) } } },
                    self.exclusion.to_clause(),
                ]
            },
            "size": self.size,
            "fields": [self.message_field, self.timestamp_field],
        })
    }
}
