//! The poll loop.
//!
//! Each poll resolves the newest index, asks for documents newer than the
//! cursor, prints them in store order and moves the cursor to the last
//! printed timestamp. The cursor is overwritten, not maximized: hits that
//! arrive out of order can move it backwards.

use std::io::Write;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cli::TailConfig;
use crate::client::SearchBackend;
use crate::error::Result;
use crate::index::select_latest;
use crate::output::{LogLine, OutputFormat};
use crate::query::QueryBuilder;
use crate::search::{display_value, Hit};
use crate::timestamp::{format_cursor, parse_cursor};

/// Polls a [`SearchBackend`] and prints new log lines.
#[derive(Debug)]
pub struct Tailer<B> {
    backend: B,
    config: TailConfig,
    output: OutputFormat,
    cursor: DateTime<Utc>,
}

impl<B: SearchBackend> Tailer<B> {
    /// Creates a tailer whose cursor starts at the current time.
    #[must_use]
    pub fn new(backend: B, config: TailConfig) -> Self {
        Self::with_cursor(backend, config, Utc::now())
    }

    /// Creates a tailer with an explicit starting cursor.
    #[must_use]
    pub fn with_cursor(backend: B, config: TailConfig, cursor: DateTime<Utc>) -> Self {
        let output = OutputFormat::new(config.format);
        Self {
            backend,
            config,
            output,
            cursor,
        }
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> DateTime<Utc> {
        self.cursor
    }

    /// The backend being polled.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolves the index to query this poll.
    ///
    /// # Errors
    ///
    /// Returns an error if the status fetch fails or no index has the prefix.
    pub async fn resolve_index(&self) -> Result<String> {
        let status = self.backend.status().await?;
        let index = select_latest(status.index_names(), &self.config.prefix)?;
        debug!(index = %index, "Resolved index");
        Ok(index)
    }

    /// Runs a single poll, writing any new lines to `out`.
    ///
    /// Returns the number of lines written.
    ///
    /// # Errors
    ///
    /// Returns the first error from resolution, search, output, or
    /// timestamp parsing.
    pub async fn poll_once<W: Write>(&mut self, out: &mut W) -> Result<usize> {
        let index = self.resolve_index().await?;

        let body = QueryBuilder::new(
            &self.config.timestamp_field,
            &self.config.message_field,
            &self.config.exclusion,
            self.config.size,
        )
        .build(&self.cursor);

        let response = self.backend.search(&index, &body).await?;
        let hits = response.hits.hits;
        debug!(index = %index, hits = hits.len(), cursor = %format_cursor(&self.cursor), "Poll complete");

        for hit in &hits {
            self.emit(out, &index, hit)?;
        }
        out.flush()?;

        Ok(hits.len())
    }

    fn emit<W: Write>(&mut self, out: &mut W, index: &str, hit: &Hit) -> Result<()> {
        let timestamp = hit.timestamp(&self.config.timestamp_field)?;
        let message = display_value(hit.first(&self.config.message_field)?);

        self.output.write(
            out,
            &LogLine {
                timestamp,
                message: &message,
                index,
            },
        )?;

        self.cursor = parse_cursor(timestamp)?;
        Ok(())
    }

    /// Polls forever, sleeping the configured interval between polls.
    ///
    /// # Errors
    ///
    /// Returns the first error from any poll; there is no retry.
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        info!(
            host = %self.config.host,
            prefix = %self.config.prefix,
            excluded_fields = self.config.exclusion.len(),
            "Tailing"
        );

        loop {
            self.poll_once(out).await?;
            tokio::time::sleep(self.config.interval).await;
        }
    }
}
