//! # Logging and Task Tracking
//!
//! - **[`logger`]**: `tracing-subscriber` setup (stderr, optional rotated file)
//! - **[`config`]**: logging configuration from the environment
//! - **[`task_tracker`]**: instrumented `tokio::spawn` used for column fetches
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `board_client=debug,info`)
//! - `BOARD_LOG_DIR`: Directory for `board-client.log` (daily rotation); stderr only when unset
//! - `BOARD_LOG_JSON`: JSON lines on stderr (1=on, 0=off)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use board_client::debug::{self, DebugConfig};
//!
//! let _guard = debug::init_logger(&DebugConfig::from_env());
//! tracing::info!(column_id = 7, "Column mounted");
//! ```

pub mod config;
pub mod logger;
pub mod task_tracker;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use task_tracker::{active_task_count, spawn_tracked};
