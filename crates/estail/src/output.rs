//! Output formatting for tailed lines.
//!
//! Supports plain text (`<timestamp> <message>`) and JSON lines.

use std::io::Write;

use serde::Serialize;

use crate::cli::Format;
use crate::error::{Result, TailError};

/// Output formatter that handles both text and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write one line to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W: Write>(&self, writer: &mut W, line: &LogLine<'_>) -> Result<()> {
        match self.format {
            Format::Json => {
                serde_json::to_writer(&mut *writer, line)
                    .map_err(|e| TailError::Io(e.into()))?;
                writeln!(writer)?;
            }
            Format::Text => {
                writeln!(writer, "{} {}", line.timestamp, line.message)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Text)
    }
}

/// A single tailed log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine<'a> {
    /// Timestamp exactly as the store returned it.
    pub timestamp: &'a str,
    /// Rendered message.
    pub message: &'a str,
    /// Index the hit came from.
    pub index: &'a str,
}
