//! # Client Configuration
//!
//! Gateway configuration loaded from environment variables and handed to
//! [`crate::services::api::ApiClient::new`] at construction.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BOARD_API_BASE_URL` | `https://sp-taskify-api.vercel.app/9-2` |
//! | `BOARD_API_TIMEOUT_SECS` | `10` |
//! | `BOARD_ACCESS_TOKEN` | unset |
//!
//! ```rust,no_run
//! use board_client::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?;
//! config.validate()?;
//! # Ok::<(), board_client::core::ConfigError>(())
//! ```

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::core::error::ConfigError;

/// Deployed card API.
pub const DEFAULT_BASE_URL: &str = "https://sp-taskify-api.vercel.app/9-2";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Gateway configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every card path is appended to, without a trailing `/`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Token seeded into the session defaults at construction.
    ///
    /// Equivalent to calling `set_token` right after building the client.
    pub default_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_token: None,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with every other value defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("BOARD_API_BASE_URL")
            .map(trim_base_url)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = get_env_parse("BOARD_API_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let default_token = env::var("BOARD_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            default_token,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("base URL must not be empty".to_string()));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Read and parse an optional environment variable.
fn get_env_parse<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::WrongFormat {
                name,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
