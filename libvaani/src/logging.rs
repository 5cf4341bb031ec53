//! Centralized logging configuration for the Vaani binaries
//!
//! Two sinks are supported:
//! - stderr, for the one-shot CLI
//! - a daily-rolled file under the data directory, for the TUI (which owns
//!   the terminal and must not interleave log lines with the drawn screen)

use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output
    Text,
    /// Machine-parseable JSON (one object per line)
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    /// Log to this directory instead of stderr
    pub file_dir: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: String) -> Self {
        Self {
            format,
            level,
            file_dir: None,
        }
    }

    /// Route output to a daily-rolled `vaani.log` in `dir`
    pub fn with_file_dir(mut self, dir: PathBuf) -> Self {
        self.file_dir = Some(dir);
        self
    }

    /// Initialize the global subscriber.
    ///
    /// Returns the appender guard when logging to a file; the caller must
    /// keep it alive for the lifetime of the process or buffered lines are
    /// lost on exit.
    ///
    /// # Panics
    ///
    /// Panics if a subscriber has already been installed.
    pub fn init(&self) -> Option<WorkerGuard> {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match &self.file_dir {
            Some(dir) => {
                let appender = tracing_appender::rolling::daily(dir, "vaani.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);

                match self.format {
                    LogFormat::Json => {
                        tracing_subscriber::fmt()
                            .json()
                            .with_env_filter(filter)
                            .with_writer(writer)
                            .with_ansi(false)
                            .with_target(true)
                            .init();
                    }
                    LogFormat::Text => {
                        tracing_subscriber::fmt()
                            .with_env_filter(filter)
                            .with_writer(writer)
                            .with_ansi(false)
                            .with_target(false)
                            .init();
                    }
                }
                Some(guard)
            }
            None => {
                match self.format {
                    LogFormat::Json => {
                        tracing_subscriber::fmt()
                            .json()
                            .with_env_filter(filter)
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .init();
                    }
                    LogFormat::Text => {
                        tracing_subscriber::fmt()
                            .with_env_filter(filter)
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_level(true)
                            .init();
                    }
                }
                None
            }
        }
    }
}

/// Initialize stderr logging with default settings.
///
/// Respects `VAANI_LOG_FORMAT` and `VAANI_LOG_LEVEL`; falls back to text
/// format at info level.
pub fn init_default() {
    let format = std::env::var("VAANI_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("VAANI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level).init();
}
