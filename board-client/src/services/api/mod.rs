//! # Card API Client Module
//!
//! HTTP access to the card API, authenticated from the session cookie.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── credentials.rs  - Session token lookup (server headers or browser cookies)
//! ├── client.rs       - ApiClient gateway: base URL, interception, response decoding
//! └── cards.rs        - Card endpoints (create, list, read, update, delete)
//! ```

pub mod cards;
pub mod client;
pub mod credentials;

pub use cards::*;
pub use client::{ApiClient, Environment};
pub use credentials::{resolve_token, CookieStore, TokenContext, ACCESS_TOKEN_COOKIE};
