//! # Session Cookies
//!
//! The browser side of the session: an in-memory cookie store, the writes the
//! login and logout flows make to it, and the redirect that keeps a signed-in
//! user away from the landing and auth pages.

use parking_lot::RwLock;

use super::api::credentials::{resolve_token, CookieStore, TokenContext, ACCESS_TOKEN_COOKIE};
use crate::core::error::CredentialError;

/// Pages a signed-in user is sent away from.
pub const RESTRICTED_PATHS: [&str; 3] = ["/", "/login", "/signup"];

/// Where signed-in users land.
pub const DASHBOARD_PATH: &str = "/mydashboard";

/// In-memory cookie store, rendered like `document.cookie`.
///
/// Cookies keep insertion order; setting an existing name replaces its value
/// in place.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: RwLock<Vec<(String, String)>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `"a=1; b=2"` cookie string. Segments without `=` are skipped.
    pub fn from_cookie_string(cookies: &str) -> Self {
        let jar = Self::new();
        for (name, value) in cookies
            .split("; ")
            .filter_map(|segment| segment.split_once('='))
        {
            jar.set(name, value);
        }
        jar
    }

    pub fn set(&self, name: &str, value: &str) {
        let mut cookies = self.cookies.write();
        match cookies.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => cookies.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .read()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn remove(&self, name: &str) {
        self.cookies.write().retain(|(n, _)| n != name);
    }
}

impl CookieStore for CookieJar {
    fn cookie_string(&self) -> Result<String, CredentialError> {
        Ok(self
            .cookies
            .read()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "))
    }
}

/// Persist the session token after login.
pub fn store_access_token(jar: &CookieJar, token: &str) {
    jar.set(ACCESS_TOKEN_COOKIE, token);
    tracing::debug!("Session token stored");
}

/// Discard the session token on logout or expiry.
pub fn clear_access_token(jar: &CookieJar) {
    jar.remove(ACCESS_TOKEN_COOKIE);
    tracing::debug!("Session token cleared");
}

/// Redirect target for a page load at `path`, if any.
///
/// Only browsers redirect: a signed-in user opening `/`, `/login` or
/// `/signup` goes to the dashboard. Server rendering never redirects here,
/// and neither does a cookie store that cannot be read.
pub fn auth_redirect(context: TokenContext<'_>, path: &str) -> Option<&'static str> {
    let TokenContext::Browser(_) = context else {
        return None;
    };

    let signed_in = matches!(resolve_token(context), Ok(Some(_)));
    (signed_in && RESTRICTED_PATHS.iter().any(|p| *p == path)).then_some(DASHBOARD_PATH)
}
