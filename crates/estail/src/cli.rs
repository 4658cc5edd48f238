//! Command-line argument parsing with clap.

use std::ffi::OsString;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::{Result, TailError};
use crate::query::ExclusionFilter;

/// Tail log lines from an Elasticsearch-backed log store.
#[derive(Parser, Debug, Clone)]
#[command(name = "estail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host and port of Elasticsearch.
    #[arg(long, default_value = "localhost:9200")]
    pub host: String,

    /// Prefix of log indexes.
    #[arg(long, default_value = "logstash-")]
    pub prefix: String,

    /// Message field to display.
    #[arg(long, default_value = "@message")]
    pub message: String,

    /// Timestamp field to sort and filter by.
    #[arg(long, default_value = "@timestamp")]
    pub timestamp: String,

    /// Comma separated list of field:value pairs to exclude.
    #[arg(long, default_value = "")]
    pub exclude: String,

    /// Number of docs to return per polling interval.
    #[arg(long, default_value_t = 1000)]
    pub size: usize,

    /// Milliseconds to sleep between polls.
    #[arg(long, default_value_t = 1000)]
    pub interval: u64,

    /// Per-request timeout in seconds (0 waits forever).
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// `<timestamp> <message>` per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Long flags that also accept the single-dash spelling (`-host`).
const LONG_FLAGS: &[&str] = &[
    "host", "prefix", "message", "timestamp", "exclude", "size", "interval", "timeout",
    "format",
];

/// Rewrites single-dash long flags (`-host x`, `-host=x`) to `--host`.
///
/// Without this, clap reads `-host` as `-h` and prints help. The argument
/// following a flag is its value and is passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut value_next = false;
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || value_next || passthrough {
            value_next = false;
            out.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let long = text.strip_prefix("--").or_else(|| {
            text.strip_prefix('-').filter(|rest| !rest.starts_with('-'))
        });
        let Some(long) = long else {
            out.push(arg);
            continue;
        };

        let (name, inline_value) = match long.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (long, None),
        };
        if !LONG_FLAGS.contains(&name) {
            out.push(arg);
            continue;
        }

        match inline_value {
            Some(value) => out.push(format!("--{name}={value}").into()),
            None => {
                out.push(format!("--{name}").into());
                value_next = true;
            }
        }
    }

    out
}

/// Validated, immutable tailer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailConfig {
    /// host:port of the search service.
    pub host: String,
    /// Index name prefix.
    pub prefix: String,
    /// Field printed as the message.
    pub message_field: String,
    /// Field used for the time range.
    pub timestamp_field: String,
    /// Parsed exclusion pairs.
    pub exclusion: ExclusionFilter,
    /// Maximum hits per poll.
    pub size: usize,
    /// Delay between polls.
    pub interval: Duration,
    /// Per-request timeout, `None` for no limit.
    pub request_timeout: Option<Duration>,
    /// Output format.
    pub format: Format,
}

impl TailConfig {
    /// Creates a configuration with the default flag values.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            prefix: "logstash-".into(),
            message_field: "@message".into(),
            timestamp_field: "@timestamp".into(),
            exclusion: ExclusionFilter::new(),
            size: 1000,
            interval: Duration::from_secs(1),
            request_timeout: Some(Duration::from_secs(30)),
            format: Format::Text,
        }
    }
}

impl TryFrom<Cli> for TailConfig {
    type Error = TailError;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.host.is_empty() {
            return Err(TailError::Config("host must not be empty".into()));
        }
        if cli.size == 0 {
            return Err(TailError::Config("size must be greater than zero".into()));
        }

        let exclusion = ExclusionFilter::parse(&cli.exclude)?;
        let request_timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));

        Ok(Self {
            host: cli.host,
            prefix: cli.prefix,
            message_field: cli.message,
            timestamp_field: cli.timestamp,
            exclusion,
            size: cli.size,
            interval: Duration::from_millis(cli.interval),
            request_timeout,
            format: cli.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_flag_table() {
        let cli = Cli::parse_from(["estail"]);
        assert_eq!(cli.host, "localhost:9200");
        assert_eq!(cli.prefix, "logstash-");
        assert_eq!(cli.message, "@message");
        assert_eq!(cli.timestamp, "@timestamp");
        assert_eq!(cli.exclude, "");
        assert_eq!(cli.size, 1000);
        assert_eq!(cli.format, Format::Text);

        let config = TailConfig::try_from(cli).unwrap();
        assert_eq!(config, TailConfig::new("localhost:9200"));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "estail",
            "--host",
            "es:9201",
            "--prefix",
            "app-",
            "--message",
            "msg",
            "--timestamp",
            "ts",
            "--exclude",
            "level:debug",
            "--size",
            "50",
            "--interval",
            "250",
            "--format",
            "json",
        ]);
        let config = TailConfig::try_from(cli).unwrap();

        assert_eq!(config.host, "es:9201");
        assert_eq!(config.prefix, "app-");
        assert_eq!(config.message_field, "msg");
        assert_eq!(config.timestamp_field, "ts");
        assert_eq!(config.exclusion.get("level"), Some("debug"));
        assert_eq!(config.size, 50);
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn single_dash_long_flags_parse() {
        let args = normalize_args(["estail", "-host", "es:9201", "-size", "5"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.host, "es:9201");
        assert_eq!(cli.size, 5);
    }

    #[test]
    fn single_dash_inline_value_parses() {
        let args = normalize_args(["estail", "-host=es:9201", "-exclude=level:debug"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.host, "es:9201");
        assert_eq!(cli.exclude, "level:debug");
    }

    #[test]
    fn flag_values_are_not_rewritten() {
        let args = normalize_args(["estail", "-prefix", "-size", "-message=-host"]);
        assert_eq!(
            args,
            ["estail", "--prefix", "-size", "--message=-host"].map(OsString::from)
        );
    }

    #[test]
    fn arguments_after_double_dash_are_untouched() {
        let args = normalize_args(["estail", "--", "-host"]);
        assert_eq!(args, ["estail", "--", "-host"].map(OsString::from));
    }

    #[test]
    fn short_flags_are_left_alone() {
        let args = normalize_args(["estail", "-f", "json", "--host", "es:1"]);
        assert_eq!(args, ["estail", "-f", "json", "--host", "es:1"].map(OsString::from));
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn unknown_single_dash_flag_still_errors() {
        let args = normalize_args(["estail", "-bogus"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn zero_timeout_disables_limit() {
        let cli = Cli::parse_from(["estail", "--timeout", "0"]);
        let config = TailConfig::try_from(cli).unwrap();
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn zero_size_is_rejected() {
        let cli = Cli::parse_from(["estail", "--size", "0"]);
        assert!(matches!(TailConfig::try_from(cli), Err(TailError::Config(_))));
    }

    #[test]
    fn bad_exclusion_is_rejected() {
        let cli = Cli::parse_from(["estail", "--exclude", "level"]);
        assert!(matches!(
            TailConfig::try_from(cli),
            Err(TailError::InvalidExclusion { .. })
        ));
    }
}
