//! Error types for the tailer.
//!
//! Every failure is fatal: the poll loop stops on the first error and the
//! binary exits with [`EXIT_FATAL`].

use thiserror::Error;

/// Process exit status used for every fatal error.
pub const EXIT_FATAL: u8 = 2;

/// Errors that can stop the tailer.
#[derive(Debug, Error)]
pub enum TailError {
    /// The search service could not be reached.
    #[error("error contacting Elasticsearch {host}: {message}")]
    Connection {
        /// host:port that was contacted.
        host: String,
        /// Underlying transport error.
        message: String,
    },

    /// A response body was not the expected JSON shape.
    #[error("error decoding {what} response: {message}")]
    Decode {
        /// Which response failed to decode.
        what: &'static str,
        /// Decoder message.
        message: String,
    },

    /// No index name starts with the configured prefix.
    #[error("no indexes found with the prefix '{prefix}'")]
    NoIndices {
        /// The configured prefix.
        prefix: String,
    },

    /// The status endpoint answered with a non-success status.
    #[error("Elasticsearch _status failed: {status}\n{body}")]
    StatusFailed {
        /// HTTP status line.
        status: String,
        /// Response body, as returned.
        body: String,
    },

    /// The search endpoint answered with a non-success status.
    #[error("Elasticsearch failed: {status}\n{body}")]
    SearchFailed {
        /// HTTP status line.
        status: String,
        /// Response body, as returned.
        body: String,
    },

    /// The exclusion list could not be parsed.
    #[error("invalid exclusion '{pair}': {reason}")]
    InvalidExclusion {
        /// The offending `field:value` pair.
        pair: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A hit carried a timestamp that is not RFC 3339.
    #[error("error decoding timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw value.
        value: String,
        /// Parser message.
        message: String,
    },

    /// A hit is missing one of the projected fields.
    #[error("hit is missing field '{0}'")]
    MissingField(String),

    /// A command-line value is out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tailer operations.
pub type Result<T> = std::result::Result<T, TailError>;

impl TailError {
    /// Wraps a JSON decoding failure for the named response.
    pub(crate) fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            what,
            message: err.to_string(),
        }
    }
}
