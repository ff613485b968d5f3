//! # API Client
//!
//! The authenticated request gateway: one `reqwest` connection pool, one base
//! URL, and an interception step run before every request.
//!
//! ## Interception
//!
//! 1. Copy the forwarded `cookie` headers onto the request (server rendering); nothing else is forwarded
//! 2. Apply the session defaults (`set_token`)
//! 3. Resolve the session token for the environment
//! 4. Token found: `Authorization: Bearer <token>`
//! 5. Resolution failed: the request is rejected with [`ApiError::Credential`] and never sent
//! 6. No token: the request is sent as is and the backend decides
//!
//! A token found in cookies wins over the session default. The cookie is the
//! source of truth; the default only covers the window between login and the
//! cookie becoming visible.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{Card, CardDetail, CardList, CreateCardRequest, ErrorResponse, UpdateCardRequest};
use tracing::debug;
use uuid::Uuid;

use super::credentials::{resolve_token, CookieStore, TokenContext};
use crate::config::ClientConfig;
use crate::core::error::{ApiError, ConfigError, CredentialError, Result};
use crate::core::service::CardService;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Where the gateway runs, which decides where the session token lives.
#[derive(Clone)]
pub enum Environment {
    /// Server rendering: headers forwarded from the incoming request.
    ///
    /// The token is read from their `cookie` header.
    Server(HeaderMap),
    /// Browser: an ambient cookie store.
    Browser(Arc<dyn CookieStore>),
}

/// Request defaults shared by every clone of one gateway.
#[derive(Debug, Default)]
struct SessionDefaults {
    token: Option<String>,
}

/// HTTP client for the card API.
///
/// Cloning is cheap and shares the connection pool and the session defaults.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Arc<str>,
    environment: Environment,
    session: Arc<RwLock<SessionDefaults>>,
}

impl ApiClient {
    /// Create a gateway with no cookie source.
    ///
    /// Requests are authenticated only through the session defaults.
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_environment(config, Environment::Server(HeaderMap::new()))
    }

    /// Create a gateway reading the token from a browser cookie store.
    pub fn with_cookie_store(
        config: ClientConfig,
        store: Arc<dyn CookieStore>,
    ) -> std::result::Result<Self, ConfigError> {
        Self::with_environment(config, Environment::Browser(store))
    }

    /// Create a gateway for an explicit environment.
    pub fn with_environment(
        config: ClientConfig,
        environment: Environment,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout).build()?;

        let session = SessionDefaults {
            token: config.default_token,
        };

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            environment,
            session: Arc::new(RwLock::new(session)),
        })
    }

    /// A gateway scoped to one incoming server request.
    ///
    /// The `cookie` headers of `headers` are forwarded on every call and the
    /// token is resolved from them; other headers are ignored. The connection
    /// pool and session defaults stay shared.
    pub fn for_server_request(&self, headers: HeaderMap) -> Self {
        Self {
            environment: Environment::Server(headers),
            ..self.clone()
        }
    }

    /// Set the default `Authorization` for every later request of this gateway.
    ///
    /// Used right after login, before the `accessToken` cookie is readable.
    pub fn set_token(&self, token: impl Into<String>) {
        self.session.write().token = Some(token.into());
    }

    /// Drop the default `Authorization` (logout).
    pub fn clear_token(&self) {
        self.session.write().token = None;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request against `path` under the base URL.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Intercept and send a request.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let mut request = builder.build()?;
        self.intercept(&mut request)?;

        let request_id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            request
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        let method = request.method().clone();
        let url = request.url().clone();
        let authenticated = request.headers().contains_key(AUTHORIZATION);
        let start = Instant::now();

        let response = self.client.execute(request).await?;

        debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            authenticated,
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "Card API request completed"
        );

        Ok(response)
    }

    /// Attach credentials to an outgoing request.
    fn intercept(&self, request: &mut Request) -> std::result::Result<(), CredentialError> {
        // reqwest always carries a header map, so there is no container to create
        let headers = request.headers_mut();

        if let Some(token) = self.session.read().token.as_deref() {
            headers.insert(AUTHORIZATION, bearer(token)?);
        }

        let token = match &self.environment {
            Environment::Server(forwarded) => {
                // Cookies may arrive split over several headers; keep every one
                for value in forwarded.get_all(COOKIE) {
                    headers.append(COOKIE, value.clone());
                }
                resolve_token(TokenContext::Server(forwarded))?
            }
            Environment::Browser(store) => resolve_token(TokenContext::Browser(store.as_ref()))?,
        };

        if let Some(token) = token {
            headers.insert(AUTHORIZATION, bearer(&token)?);
        }

        Ok(())
    }
}

fn bearer(token: &str) -> std::result::Result<HeaderValue, CredentialError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| CredentialError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Decode a JSON body, turning non-2xx statuses into [`ApiError::Http`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(http_error(status.as_u16(), body));
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(source) => Err(ApiError::Decode { source, body }),
    }
}

/// Check the status of a response whose body is not needed.
pub(crate) async fn read_empty(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await?;
    Err(http_error(status.as_u16(), body))
}

fn http_error(status: u16, body: String) -> ApiError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .map(|e| e.message);

    ApiError::Http {
        status,
        message,
        body,
    }
}

#[async_trait::async_trait]
impl CardService for ApiClient {
    async fn create_card(&self, request: &CreateCardRequest) -> Result<Card> {
        crate::services::api::cards::create_card(self, request).await
    }

    async fn list_cards(&self, column_id: i64) -> Result<CardList> {
        crate::services::api::cards::list_cards(self, column_id).await
    }

    async fn update_card(&self, card_id: i64, request: &UpdateCardRequest) -> Result<Card> {
        crate::services::api::cards::update_card(self, card_id, request).await
    }

    async fn get_card(&self, card_id: i64) -> Result<CardDetail> {
        crate::services::api::cards::get_card(self, card_id).await
    }

    async fn delete_card(&self, card_id: i64) -> Result<()> {
        crate::services::api::cards::delete_card(self, card_id).await
    }
}
