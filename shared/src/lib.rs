//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the board client and the card API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::card`]**: Cards, assignees, list pages and create/update payloads
//!   - **[`dto::error`]**: Error bodies returned by the backend
//!
//! ## Wire Format
//!
//! The card API speaks camelCase JSON:
//! - Rust `snake_case` fields map to `camelCase` keys via `#[serde(rename_all = "camelCase")]`
//! - Timestamps are RFC 3339 strings parsed into `chrono::DateTime<Utc>`
//! - `dueDate` stays a plain string; the backend owns its format
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::card::CardList;
//!
//! let page: CardList = serde_json::from_str(
//!     r#"{"cursorId": null, "totalCount": 0, "cards": []}"#,
//! ).unwrap();
//! assert!(page.cards.is_empty());
//! ```

pub mod dto;

// Wildcard re-export: every DTO is public API
pub use dto::*;
