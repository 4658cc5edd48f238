//! Index selection.
//!
//! Index names are assumed to embed a date (`logstash-2021.01.02`), so the
//! lexicographically greatest name with the configured prefix is taken as the
//! newest.

use crate::error::{Result, TailError};

/// Picks the greatest index name starting with `prefix`.
///
/// The prefix match is exact and case-sensitive.
///
/// # Errors
///
/// Returns [`TailError::NoIndices`] if no name has the prefix.
pub fn select_latest<'a, I>(names: I, prefix: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matching: Vec<&str> = names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect();
    matching.sort_unstable();

    matching
        .last()
        .map(|name| (*name).to_string())
        .ok_or_else(|| TailError::NoIndices {
            prefix: prefix.to_string(),
        })
}
