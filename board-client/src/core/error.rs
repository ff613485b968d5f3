//! # Common Error Types
//!
//! Error handling for the board client.
//!
//! ## Error Categories
//!
//! - [`CredentialError`]: the session token could not be resolved from its context
//! - [`ApiError`]: a gateway request failed (credential, transport, HTTP status, body decode)
//! - [`ConfigError`]: client configuration is missing or invalid
//!
//! Card operations never wrap or rewrite an [`ApiError`]: the caller receives
//! the status code and backend body exactly as the gateway observed them.
//! Use [`ApiError::kind`] to branch on the failure category:
//!
//! ```rust
//! use board_client::core::error::{ApiError, ErrorKind};
//!
//! let err = ApiError::Http { status: 404, message: Some("card not found".into()), body: String::new() };
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert!(err.is_not_found());
//! ```

use thiserror::Error;

/// Failure while resolving the session token.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The `cookie` header on a server request is not visible ASCII text.
    #[error("cookie header is not valid text")]
    InvalidHeader,

    /// The resolved token cannot be carried in an `Authorization` header.
    #[error("session token contains characters not allowed in a header")]
    InvalidToken,

    /// The browser cookie store could not be read.
    #[error("cookie store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Error returned by every gateway request and card operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token resolution failed; the request was not sent.
    #[error("credential resolution failed: {0}")]
    Credential(#[from] CredentialError),

    /// Network, DNS, TLS or timeout failure.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the backend's `{"message": ...}` text when the body had one;
    /// `body` is the raw response body.
    #[error("HTTP {status}: {}", http_detail(.message, .body))]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// A 2xx body did not match the expected shape.
    #[error("failed to parse response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

fn http_detail<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

/// Failure category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Token lookup failed before sending.
    Resolution,
    /// 401 from the backend.
    Unauthenticated,
    /// 404 from the backend.
    NotFound,
    /// Any other 4xx, typically a rejected create/update payload.
    Validation,
    /// 5xx from the backend.
    Server,
    /// Network/DNS/timeout.
    Transport,
    /// Unparseable success body.
    Decode,
}

impl ApiError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Credential(_) => ErrorKind::Resolution,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Decode { .. } => ErrorKind::Decode,
            ApiError::Http { status, .. } => match *status {
                401 => ErrorKind::Unauthenticated,
                404 => ErrorKind::NotFound,
                500..=599 => ErrorKind::Server,
                _ => ErrorKind::Validation,
            },
        }
    }

    /// HTTP status code, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Backend-provided message, for the presentation layer to display.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }
}

/// Client configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {reason}")]
    WrongFormat { name: &'static str, reason: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
