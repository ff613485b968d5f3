//! Logging initialization

use super::config::{DebugConfig, LOG_FILE_NAME};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system
///
/// Sets up:
/// - stderr output (text, or JSON lines with `BOARD_LOG_JSON=1`)
/// - a daily-rotated file in `BOARD_LOG_DIR` when set, written without blocking
///
/// Keep the returned guard alive until exit so buffered file lines are flushed.
/// Calling this twice leaves the first subscriber in place.
pub fn init(config: &DebugConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(super::config::DEFAULT_LOG_LEVEL));

    let stderr_layer = if config.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let mut guard = None;
    let file_layer = config.log_dir.as_ref().and_then(|dir| {
        // Create logs directory if it doesn't exist
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Warning: Failed to create log directory: {}", e);
            return None;
        }

        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        Some(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false), // No ANSI codes in log files
        )
    });

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if result.is_err() {
        return None;
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_file = ?config.log_file_for(chrono::Utc::now().date_naive()),
        json = config.json,
        "Logging initialized"
    );

    guard
}
