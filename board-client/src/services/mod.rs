//! # External Service Integrations
//!
//! - **[`api`]**: card API gateway, credential resolution and card endpoints
//! - **[`session`]**: browser cookie store, login/logout cookie writes, auth redirect

pub mod api;
pub mod session;

pub use api::ApiClient;
pub use session::CookieJar;
