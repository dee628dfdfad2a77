use std::error::Error;
use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as subscriber_fmt};

// Import CRATE_NAMES, which lists all crates in the workspace.
include!(concat!(env!("OUT_DIR"), "/constants.gen.rs"));

/// Controls the log format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Auto detect the best format.
    ///
    /// This chooses [`LogFormat::Pretty`] for TTY, otherwise [`LogFormat::Simplified`].
    #[default]
    Auto,

    /// Pretty printing with colors.
    ///
    /// ```text
    ///  INFO semattr::setup: metrics disabled
    /// ```
    Pretty,

    /// Simplified plain text output.
    ///
    /// ```text
    /// 2020-12-04T12:10:32Z  INFO semattr::setup: metrics disabled
    /// ```
    Simplified,

    /// Dump out JSON lines.
    ///
    /// ```text
    /// {"timestamp":"2020-12-04T12:11:08.729716Z","level":"INFO","target":"semattr::setup","message":"metrics disabled"}
    /// ```
    Json,
}

impl LogFormat {
    /// Returns the string representation of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Pretty => "pretty",
            Self::Simplified => "simplified",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ParseLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "auto" => Self::Auto,
            "pretty" => Self::Pretty,
            "simplified" => Self::Simplified,
            "json" => Self::Json,
            _ => return Err(ParseLogError("log format")),
        })
    }
}

/// The maximum level of log messages from workspace crates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Disables logging.
    Off,
    /// Only errors.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages and above.
    #[default]
    Info,
    /// Debug messages and above.
    Debug,
    /// All messages.
    Trace,
}

impl Level {
    /// Returns the string representation of this level, as used in filter directives.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Returns the `tracing` filter for this level.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "error" => Self::Error,
            "warn" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => return Err(ParseLogError("log level")),
        })
    }
}

/// Error returned when parsing a [`Level`] or [`LogFormat`] fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseLogError(&'static str);

impl fmt::Display for ParseLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}", self.0)
    }
}

impl Error for ParseLogError {}

/// Controls the logging system.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// The log level for all workspace crates.
    pub level: Level,

    /// Controls the log output format.
    ///
    /// Defaults to [`LogFormat::Auto`], which detects the best format based on the TTY.
    pub format: LogFormat,
}

/// Returns the filter used when `RUST_LOG` is not set.
///
/// Third-party crates log at INFO, workspace crates at the configured level.
fn default_filter(level: Level) -> EnvFilter {
    let global = if level.level_filter() < LevelFilter::INFO {
        level
    } else {
        Level::Info
    };

    let mut directives = vec![global.as_str().to_owned()];
    for name in CRATE_NAMES {
        directives.push(format!("{name}={level}"));
    }

    EnvFilter::new(directives.join(","))
}

/// Initialize the logging system.
///
/// The `RUST_LOG` environment variable overrides the filters derived from the configured level.
/// Calling this function more than once has no effect.
///
/// # Example
///
/// ```
/// let log_config = semattr_log::LogConfig::default();
/// semattr_log::init(&log_config);
/// ```
pub fn init(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config.level));

    let format = match (config.format, console::user_attended_stderr()) {
        (LogFormat::Auto, true) => LogFormat::Pretty,
        (LogFormat::Auto, false) => LogFormat::Simplified,
        (format, _) => format,
    };

    let format_layer = match format {
        LogFormat::Json => subscriber_fmt::layer()
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed(),
        LogFormat::Simplified => subscriber_fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(false)
            .boxed(),
        LogFormat::Pretty | LogFormat::Auto => subscriber_fmt::layer()
            .with_writer(io::stderr)
            .without_time()
            .with_ansi(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(format_layer.with_filter(filter))
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.format, LogFormat::Auto);
    }

    #[test]
    fn test_parse_config() {
        let config: LogConfig =
            serde_json::from_str(r#"{"level": "trace", "format": "json"}"#).unwrap();
        assert_eq!(config.level, Level::Trace);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("DEBUG".parse::<Level>(), Ok(Level::Debug));
        assert_eq!(
            "verbose".parse::<Level>().unwrap_err().to_string(),
            "invalid log level"
        );
    }

    #[test]
    fn test_default_filter_covers_workspace() {
        assert!(CRATE_NAMES.contains(&"semattr_log"));

        let filter = default_filter(Level::Trace).to_string();
        assert!(filter.contains("semattr_log=trace"), "{filter}");
    }
}
