//! # Taskify Board Client - Library Root
//!
//! Client-side data access and session layer for the Taskify kanban board:
//! authenticated requests, card operations scoped to board columns, and
//! per-column card lists kept in step with the server.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              presentation (columns, modals)            │
//! └────────────────────────────────────────────────────────┘
//!          │ mount / notify                │ create / update / delete
//!          ▼                               ▼
//! ┌──────────────────┐           ┌─────────────────────────┐
//! │ sync::ColumnSync │──list────▶│ services::api::cards    │
//! └──────────────────┘           └─────────────────────────┘
//!                                           │
//!                                           ▼
//!                               ┌─────────────────────────┐
//!                               │ services::api::ApiClient│ ◀── credentials
//!                               │ (gateway, interception) │     (cookie → token)
//!                               └─────────────────────────┘
//!                                           │ HTTPS
//!                                           ▼
//!                                    Card API backend
//! ```
//!
//! ## Module Structure
//!
//! - **core**: error taxonomy and the `CardService` trait
//! - **config**: gateway configuration from the environment
//! - **services**: the gateway, credential resolution, card endpoints, session cookies
//! - **sync**: column synchronization units
//! - **debug**: logging setup and tracked task spawning
//!
//! ## Core Concepts
//!
//! ### Session Token
//!
//! The bearer token lives in the `accessToken` cookie. The gateway resolves it
//! on every request from the cookie source of its environment: the forwarded
//! `cookie` header when rendering on a server, the cookie store in a browser.
//! `ApiClient::set_token` sets a session default for the time between login
//! and the cookie becoming readable.
//!
//! ### Column Lists
//!
//! Each `ColumnSync` owns the first page of one column. Mutations made
//! elsewhere trigger a full re-fetch; there is no local patching.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use board_client::config::ClientConfig;
//! use board_client::services::api::ApiClient;
//! use board_client::sync::ColumnSync;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig::from_env()?)?;
//! client.set_token("eyJhbGciOi...");
//!
//! let (column, _events) = ColumnSync::new(7, Arc::new(client));
//! if let Some(fetch) = column.mount() {
//!     fetch.await?;
//! }
//! for card in column.cards() {
//!     println!("{} {}", card.id, card.title);
//! }
//! column.unmount();
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p board-client
//! ```

pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod sync;

// Re-export commonly used types for convenience
pub use crate::config::ClientConfig;
pub use crate::core::{ApiError, CardService, ErrorKind, Result};
pub use services::api::ApiClient;
pub use sync::{CardMutation, ColumnSync};
