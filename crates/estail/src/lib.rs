//! # estail
//!
//! Continuously tail log lines from an Elasticsearch-backed log store.
//!
//! Every poll:
//! - reads `/_status` and picks the newest index with the configured prefix
//! - searches it for documents newer than the cursor, minus excluded terms
//! - prints `<timestamp> <message>` per hit and advances the cursor
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  GET /_status          ┌─────────────────┐
//! │  Tailer  │───────────────────────►│  Elasticsearch  │
//! │ (cursor) │  POST /<index>/_search │                 │
//! └──────────┘◄───────────────────────└─────────────────┘
//! ```
//!
//! The network sits behind [`client::SearchBackend`], so the loop can run
//! against any implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod search;
pub mod tailer;
pub mod timestamp;

pub use cli::{Cli, Format, TailConfig};
pub use client::{HttpBackend, SearchBackend};
pub use error::{Result, TailError, EXIT_FATAL};
pub use output::OutputFormat;
pub use query::{ExclusionFilter, QueryBuilder};
pub use tailer::Tailer;
