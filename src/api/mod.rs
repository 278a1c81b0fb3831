//! HTTP API Client
//!
//! Thin wrapper over `reqwest`, organized by backend domain. Every request
//! picks up the bearer token from session storage at send time, and every 401
//! goes through `intercept_status`, the one place that ends a session.

mod admin;
mod auth;
mod product;

use std::future::Future;

use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::AuthSession;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::storage::{KeyValueStore, WebStorage};

pub use admin::DashboardStats;
pub use product::product_image_url;

/// Screen shown after the session is invalidated
pub const LOGIN_PATH: &str = "/";

/// Where to send the browser when a session ends
pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Full page navigation through `window.location`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else { return };
        if let Err(e) = window.location().set_href(path) {
            log::error!("[api] redirect to {path} failed: {e:?}");
        }
    }
}

#[derive(Clone)]
pub struct ApiClient<S = WebStorage, N = BrowserNavigator> {
    config: AppConfig,
    http: reqwest::Client,
    session: S,
    navigator: N,
}

impl ApiClient {
    /// Client backed by the browser's session storage and location
    pub fn new(config: AppConfig) -> Self {
        Self::with_parts(config, WebStorage::session(), BrowserNavigator)
    }
}

impl<S: KeyValueStore, N: Navigator> ApiClient<S, N> {
    pub fn with_parts(config: AppConfig, session: S, navigator: N) -> Self {
        Self { config, http: reqwest::Client::new(), session, navigator }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.config.endpoint(path))
            .header(CONTENT_TYPE, "application/json");
        match authorization_value(&self.session) {
            Some(bearer) => builder.header(AUTHORIZATION, bearer),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, guarded: bool) -> Result<Response, ApiError> {
        let response = with_timeout(builder.send(), self.config.request_timeout_ms).await??;
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(failure_error(status, body, guarded, &self.session, &self.navigator))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        log::debug!("[api] GET {path}");
        let response = self.send(self.request(Method::GET, path), true).await?;
        Self::decode(response).await
    }

    /// POST whose 401 means "bad credentials" rather than "session over"
    async fn post_unguarded<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("[api] POST {path}");
        let response = self.send(self.request(Method::POST, path).json(body), false).await?;
        Self::decode(response).await
    }
}

/// `Bearer <token>` for the token currently in session storage
pub fn authorization_value(session: &impl KeyValueStore) -> Option<String> {
    AuthSession::stored_token(session).map(|token| format!("Bearer {token}"))
}

/// Map a response status to the client's outcome.
///
/// 401 clears every session-held auth key and navigates to the login screen,
/// regardless of which request produced it.
pub fn intercept_status(
    status: u16,
    body: String,
    session: &impl KeyValueStore,
    navigator: &impl Navigator,
) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => {
            log::warn!("[api] authorization failed, ending session");
            if let Err(e) = AuthSession::clear_persisted(session) {
                log::error!("[api] clearing session failed: {e}");
            }
            navigator.redirect(LOGIN_PATH);
            Err(ApiError::Unauthorized)
        }
        _ => Err(ApiError::Status { status, message: body }),
    }
}

/// Error for a non-2xx response; only guarded requests can end the session
fn failure_error(
    status: u16,
    body: String,
    guarded: bool,
    session: &impl KeyValueStore,
    navigator: &impl Navigator,
) -> ApiError {
    if guarded {
        if let Err(e) = intercept_status(status, body.clone(), session, navigator) {
            return e;
        }
    }
    ApiError::Status { status, message: body }
}

async fn with_timeout<F: Future>(future: F, timeout_ms: u32) -> Result<F::Output, ApiError> {
    let future = std::pin::pin!(future);
    match select(future, TimeoutFuture::new(timeout_ms)).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(ApiError::Timeout { timeout_ms }),
    }
}
