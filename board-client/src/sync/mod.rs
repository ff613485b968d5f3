//! # Column Synchronization
//!
//! Per-column card caches that follow the card API.
//!
//! - **[`column`]**: `ColumnSync` lifecycle, `ColumnEvent`, `CardMutation`

pub mod column;

pub use column::{CardMutation, ColumnEvent, ColumnPhase, ColumnState, ColumnSync};
