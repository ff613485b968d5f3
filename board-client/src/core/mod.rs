//! # Core Abstractions
//!
//! Core traits and error types shared by the gateway, the card client and the
//! column sync units.
//!
//! ## Modules
//!
//! - **[`error`]**: Error taxonomy (`ApiError`, `CredentialError`, `ConfigError`, `Result<T>`)
//! - **[`service`]**: Service trait for dependency injection (`CardService`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use board_client::config::ClientConfig;
//! use board_client::core::service::CardService;
//! use board_client::services::api::ApiClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // In production: the HTTP client
//! let cards: Arc<dyn CardService> = Arc::new(ApiClient::new(ClientConfig::default())?);
//! // In tests: a scripted implementation of the same trait
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, ConfigError, CredentialError, ErrorKind, Result};
pub use service::CardService;
