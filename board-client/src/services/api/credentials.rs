//! # Credential Resolver
//!
//! Finds the session token in whatever cookie source the current execution
//! context offers. Callers pass the context explicitly; the lookup rules are
//! the same for both:
//!
//! - split the cookie string on `"; "`
//! - take the first segment starting with `accessToken=`
//! - the token is everything after the first `=`
//!
//! An empty value counts as absent. A value that itself contains `=` (base64
//! padding, for one) is kept whole rather than cut at its second `=`.
//!
//! ```rust
//! use board_client::services::api::credentials::{resolve_token, TokenContext};
//! use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(COOKIE, HeaderValue::from_static("theme=dark; accessToken=abc123; other=x"));
//!
//! let token = resolve_token(TokenContext::Server(&headers)).unwrap();
//! assert_eq!(token.as_deref(), Some("abc123"));
//! ```

use reqwest::header::{HeaderMap, COOKIE};

use crate::core::error::CredentialError;

/// Cookie holding the session token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Ambient cookie storage of a browser-like context.
///
/// `cookie_string` returns the store in `document.cookie` form: `"a=1; b=2"`.
pub trait CookieStore: Send + Sync {
    fn cookie_string(&self) -> Result<String, CredentialError>;
}

/// Where to look for the session token.
#[derive(Clone, Copy)]
pub enum TokenContext<'a> {
    /// Rendering on a server: the incoming request's headers.
    Server(&'a HeaderMap),
    /// Running in a browser: its cookie store.
    Browser(&'a dyn CookieStore),
}

/// Resolve the session token from `context`.
///
/// `Ok(None)` means no token; the request goes out unauthenticated.
pub fn resolve_token(context: TokenContext<'_>) -> Result<Option<String>, CredentialError> {
    match context {
        TokenContext::Server(headers) => {
            // HTTP/2 may split cookies across several headers
            for value in headers.get_all(COOKIE) {
                let cookies = value.to_str().map_err(|_| CredentialError::InvalidHeader)?;
                if let Some(token) = find_cookie(cookies, ACCESS_TOKEN_COOKIE) {
                    return Ok(Some(token.to_string()));
                }
            }
            Ok(None)
        }
        TokenContext::Browser(store) => {
            let cookies = store.cookie_string()?;
            Ok(find_cookie(&cookies, ACCESS_TOKEN_COOKIE).map(str::to_string))
        }
    }
}

/// Value of the first cookie called `name` in a `"; "`-separated cookie string.
///
/// `accessToken=a=b` yields `a=b`, not `a`.
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split("; ")
        .find(|segment| {
            segment
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('='))
        })
        .and_then(|segment| segment.split_once('='))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    struct StaticCookies(&'static str);

    impl CookieStore for StaticCookies {
        fn cookie_string(&self) -> Result<String, CredentialError> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenStore;

    impl CookieStore for BrokenStore {
        fn cookie_string(&self) -> Result<String, CredentialError> {
            Err(CredentialError::StoreUnavailable("document is gone".to_string()))
        }
    }

    fn headers_with(cookie: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(cookie));
        headers
    }

    #[test]
    fn test_server_context_finds_token_between_other_cookies() {
        let headers = headers_with("theme=dark; accessToken=abc123; other=x");
        let token = resolve_token(TokenContext::Server(&headers)).unwrap();
        assert_eq!(token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_server_context_without_cookie_header_is_absent() {
        let headers = HeaderMap::new();
        assert_eq!(resolve_token(TokenContext::Server(&headers)).unwrap(), None);
    }

    #[test]
    fn test_server_context_without_token_cookie_is_absent() {
        let headers = headers_with("theme=dark; other=x");
        assert_eq!(resolve_token(TokenContext::Server(&headers)).unwrap(), None);
    }

    #[test]
    fn test_server_context_rejects_non_text_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_bytes(b"accessToken=\xff\xfe").unwrap(),
        );
        assert!(matches!(
            resolve_token(TokenContext::Server(&headers)),
            Err(CredentialError::InvalidHeader)
        ));
    }

    #[test]
    fn test_browser_context_reads_store() {
        let store = StaticCookies("accessToken=tok; lang=ko");
        let token = resolve_token(TokenContext::Browser(&store)).unwrap();
        assert_eq!(token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_browser_context_propagates_store_failure() {
        assert!(matches!(
            resolve_token(TokenContext::Browser(&BrokenStore)),
            Err(CredentialError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        assert_eq!(find_cookie("accessTokenOld=1; accessToken=2", "accessToken"), Some("2"));
        assert_eq!(find_cookie("xaccessToken=1", "accessToken"), None);
    }

    #[test]
    fn test_find_cookie_keeps_value_after_first_equals() {
        assert_eq!(find_cookie("accessToken=a=b", "accessToken"), Some("a=b"));
    }

    #[test]
    fn test_find_cookie_empty_value_is_absent() {
        assert_eq!(find_cookie("accessToken=; a=1", "accessToken"), None);
    }
}
