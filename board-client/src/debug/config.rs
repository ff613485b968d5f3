//! Logging configuration from environment variables

use chrono::NaiveDate;
use std::path::PathBuf;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "board_client=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log level filter (e.g., "board_client=debug,info")
    pub log_level: String,
    /// Directory for the daily-rotated log file; stderr only when unset
    pub log_dir: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
            json: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            log_dir: std::env::var("BOARD_LOG_DIR")
                .ok()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            json: std::env::var("BOARD_LOG_JSON")
                .map(|v| v == "1")
                .unwrap_or(false),
        }
    }

    /// Path the daily appender writes to on `date` (UTC), if file logging is on
    ///
    /// Files are named `board-client.log.YYYY-MM-DD`.
    pub fn log_file_for(&self, date: NaiveDate) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| {
            dir.join(format!("{LOG_FILE_NAME}.{}", date.format("%Y-%m-%d")))
        })
    }
}

/// Base name of the rotated log file.
pub const LOG_FILE_NAME: &str = "board-client.log";
