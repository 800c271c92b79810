//! Tracing/logging initialization.
//!
//! The filter comes from `RUST_LOG` (default `info`) and the output format
//! from `OCM_LOG_FORMAT`: `json` (default), `full` or `compact`.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_ENV: &str = "OCM_LOG_FORMAT";
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Full,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "full" | "text" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directives, with the syntax of `RUST_LOG`.
    pub filter: String,
    pub format: LogFormat,
    /// Send output through the test harness capture instead of stdout.
    pub test_writer: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            test_writer: false,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            std::env::var(LOG_FORMAT_ENV).ok().as_deref(),
        )
    }

    fn from_vars(filter: Option<&str>, format: Option<&str>) -> Self {
        let format = match format.map(LogFormat::from_str) {
            Some(Ok(format)) => format,
            Some(Err(err)) => {
                eprintln!("{err}; using json");
                LogFormat::Json
            }
            None => LogFormat::Json,
        };
        Self {
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(DEFAULT_FILTER)
                .to_string(),
            format,
            test_writer: false,
        }
    }

    /// Configuration for tests: human readable output captured by the harness.
    pub fn for_tests() -> Self {
        Self {
            filter: std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "debug".to_string()),
            format: LogFormat::Compact,
            test_writer: true,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match (config.format, config.test_writer) {
        (LogFormat::Json, false) => builder.json().with_target(false).try_init(),
        (LogFormat::Json, true) => builder.json().with_target(false).with_test_writer().try_init(),
        (LogFormat::Full, false) => builder.try_init(),
        (LogFormat::Full, true) => builder.with_test_writer().try_init(),
        (LogFormat::Compact, false) => builder.compact().try_init(),
        (LogFormat::Compact, true) => builder.compact().with_test_writer().try_init(),
    };
}

/// Initialize logging for a test binary.
pub fn init_for_tests() {
    init(&LogConfig::for_tests());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" compact ".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Full));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn config_defaults_when_unset_or_invalid() {
        assert_eq!(LogConfig::from_vars(None, None), LogConfig::default());
        let config = LogConfig::from_vars(Some("  "), Some("xml"));
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn config_reads_given_values() {
        let config = LogConfig::from_vars(Some("ocm_api=debug"), Some("compact"));
        assert_eq!(config.filter, "ocm_api=debug");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_for_tests();
        init_for_tests();
    }
}
