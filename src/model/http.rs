/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Authenticated HTTP transport
//!
//! [`HttpClient`] sends every request with the stored access token and takes
//! care of renewing it:
//!
//! 1. A `401` from an authentication endpoint (login, register, refresh,
//!    Google) is a credentials problem and surfaces as
//!    [`AppError::InvalidCredentials`]; no refresh is attempted.
//! 2. Any other `401` asks the [`RefreshCoordinator`] what to do. The first
//!    request becomes the leader and calls `auth/refresh/`; requests failing
//!    meanwhile are queued and resumed in arrival order with the leader's
//!    outcome.
//! 3. Each request is replayed at most once with the new token. A second
//!    `401` is final.
//! 4. When the refresh fails the stored tokens are cleared, every queued
//!    request fails with [`AppError::RefreshFailed`], and the session signal
//!    moves to `Unauthenticated` with [`SessionEvent::SessionExpired`].

use crate::application::config::Config;
use crate::application::rate_limiter::RateLimiter;
use crate::constants::{
    AUTH_ENDPOINTS, NO_REFRESH_TOKEN_MESSAGE, REFRESH_INTERRUPTED_MESSAGE, REFRESH_PATH,
    SESSION_EXPIRED_MESSAGE, USER_AGENT,
};
use crate::error::{AppError, extract_error_message};
use crate::model::auth::{RefreshRequest, RefreshResponse};
use crate::session::refresh::{RefreshCoordinator, RefreshOutcome, RefreshTicket};
use crate::session::state::{AuthState, SessionEvent, SessionSignal};
use crate::storage::token_store::TokenStore;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

/// A replayable API request
///
/// The body is serialized up front so the request can be sent again after a
/// token refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, or an absolute URL
    pub path: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request without query or body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Adds query parameters
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query.extend(query);
        self
    }

    /// Attaches a JSON body
    ///
    /// # Errors
    /// `AppError::Json` if the body cannot be serialized
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, AppError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Whether the request targets an authentication endpoint
    #[must_use]
    pub fn is_auth_endpoint(&self) -> bool {
        is_auth_endpoint(&self.path)
    }
}

/// Whether `path` is one of the endpoints excluded from the refresh path
///
/// Matches relative paths and absolute URLs, with or without a query string
/// or trailing slash.
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path).trim_end_matches('/');
    AUTH_ENDPOINTS.iter().any(|endpoint| {
        let endpoint = endpoint.trim_end_matches('/');
        path == endpoint || path.ends_with(&format!("/{endpoint}"))
    })
}

/// Keeps the session in `Refreshing` while the leader runs the refresh
///
/// Dropped unsettled (the caller's future was cancelled), it puts the session
/// back to `Authenticated`.
struct RefreshingGuard<'a> {
    session: &'a SessionSignal,
    settled: bool,
}

impl<'a> RefreshingGuard<'a> {
    fn enter(session: &'a SessionSignal) -> Self {
        session.refreshing();
        Self {
            session,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for RefreshingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.refresh_abandoned();
        }
    }
}

enum Attempt {
    Completed(Response),
    Unauthorized(String),
}

/// HTTP client for the tasks API with transparent access token refresh
pub struct HttpClient {
    http_client: Client,
    config: Arc<Config>,
    store: Arc<dyn TokenStore>,
    rate_limiter: RateLimiter,
    refresh: RefreshCoordinator,
    session: SessionSignal,
}

impl HttpClient {
    /// Creates a client over `store`
    ///
    /// The initial auth state is `Authenticated` when the store already holds
    /// a token pair.
    ///
    /// # Errors
    /// If the store cannot be read or the HTTP client cannot be built
    pub async fn new(config: Arc<Config>, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;
        let rate_limiter = RateLimiter::new(&config.rate_limiter);

        let initial = if store.tokens().await?.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        debug!("HTTP client ready, initial auth state: {}", initial);

        Ok(Self {
            http_client,
            config,
            store,
            rate_limiter,
            refresh: RefreshCoordinator::new(),
            session: SessionSignal::new(initial),
        })
    }

    /// Makes a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::GET, path, None::<()>).await
    }

    /// Makes a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, AppError> {
        let request = ApiRequest::new(Method::GET, path).with_query(query);
        self.parse_response(self.send(&request).await?).await
    }

    /// Makes a POST request
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, AppError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Makes a POST request without body, as the toggle actions expect
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::POST, path, None::<()>).await
    }

    /// Makes a PUT request
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, AppError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Makes a PATCH request
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: B,
    ) -> Result<T, AppError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Makes a DELETE request; the (usually empty) response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(&ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Makes a request and deserializes the JSON answer
    pub async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, AppError> {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_json(&body)?;
        }
        self.parse_response(self.send(&request).await?).await
    }

    /// Sends a request, refreshing the access token once if it is rejected
    ///
    /// Callers never observe the refresh: they get the response of the
    /// replayed request, or the error that ended the exchange.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, AppError> {
        let generation = self.refresh.generation();
        let access = self.store.access_token().await?;

        let body = match self.execute(request, access.as_deref()).await? {
            Attempt::Completed(response) => return Ok(response),
            Attempt::Unauthorized(body) => body,
        };

        if request.is_auth_endpoint() {
            warn!(
                "Authentication rejected on {}: {}",
                request.path,
                extract_error_message(StatusCode::UNAUTHORIZED, &body)
            );
            return Err(AppError::InvalidCredentials);
        }

        debug!("Access token rejected on {}, renewing", request.path);
        let token = self.renewed_access_token(generation).await?;

        match self.execute(request, Some(&token)).await? {
            Attempt::Completed(response) => Ok(response),
            Attempt::Unauthorized(body) => {
                let message = extract_error_message(StatusCode::UNAUTHORIZED, &body);
                error!("Still unauthorized after token refresh on {}: {}", request.path, message);
                Err(AppError::Unauthorized(message))
            }
        }
    }

    /// Obtains the access token to replay a rejected request with
    ///
    /// Leads a refresh, joins the one in flight, or, when a refresh settled
    /// after the request was sent, reuses whatever token is stored now.
    async fn renewed_access_token(&self, seen_generation: u64) -> Result<String, AppError> {
        match self.refresh.acquire(seen_generation) {
            RefreshTicket::Leader(lease) => {
                let refreshing = RefreshingGuard::enter(&self.session);
                let outcome = self.refresh_access_token().await;
                refreshing.settle();
                lease.settle(&outcome);
                outcome.map_err(AppError::RefreshFailed)
            }
            RefreshTicket::Waiter(rx) => match rx.await {
                Ok(outcome) => outcome.map_err(AppError::RefreshFailed),
                Err(_) => Err(AppError::RefreshFailed(
                    REFRESH_INTERRUPTED_MESSAGE.to_string(),
                )),
            },
            RefreshTicket::Settled => self.store.access_token().await?.ok_or_else(|| {
                AppError::RefreshFailed(SESSION_EXPIRED_MESSAGE.to_string())
            }),
        }
    }

    /// Calls the refresh endpoint and applies the outcome to the store and
    /// the session signal
    async fn refresh_access_token(&self) -> RefreshOutcome {
        let result = match self.request_new_access_token().await {
            Ok(access) => self.store.set_access_token(&access).await.map(|()| access),
            Err(e) => Err(e),
        };

        match result {
            Ok(access) => {
                info!("Access token refreshed");
                self.session.refreshed();
                Ok(access)
            }
            Err(e) => {
                let reason = match e {
                    AppError::RefreshFailed(reason) => reason,
                    other => other.user_message(),
                };
                warn!("Token refresh failed, clearing session: {}", reason);
                if let Err(e) = self.store.clear().await {
                    error!("Failed to clear stored tokens: {}", e);
                }
                self.session.expired();
                Err(reason)
            }
        }
    }

    async fn request_new_access_token(&self) -> Result<String, AppError> {
        let Some(refresh) = self.store.refresh_token().await? else {
            return Err(AppError::RefreshFailed(NO_REFRESH_TOKEN_MESSAGE.to_string()));
        };

        let url = self.config.endpoint_url(REFRESH_PATH);
        self.rate_limiter.wait().await;
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&RefreshRequest { refresh: &refresh })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RefreshFailed(extract_error_message(status, &body)));
        }

        let token: RefreshResponse = response.json().await?;
        Ok(token.access)
    }

    async fn execute(&self, request: &ApiRequest, access: Option<&str>) -> Result<Attempt, AppError> {
        let url = self.config.endpoint_url(&request.path);

        self.rate_limiter.wait().await;
        debug!("{} {}", request.method, url);

        let mut builder = self
            .http_client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = access {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(Attempt::Completed(response));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(Attempt::Unauthorized(body));
        }

        let message = extract_error_message(status, &body);
        error!("Request failed with status {}: {}", status, body);
        Err(AppError::Api { status, message })
    }

    async fn parse_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, AppError> {
        Ok(response.json().await?)
    }

    /// Current auth state
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.session.state()
    }

    /// Receiver observing auth state changes
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<AuthState> {
        self.session.watch()
    }

    /// Receiver for session events, `SessionExpired` included
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// Whether a token refresh is in flight
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_refreshing()
    }

    /// Token store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn session(&self) -> &SessionSignal {
        &self.session
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.rest_api.base_url)
            .field("auth_state", &self.session.state())
            .field("refresh", &self.refresh)
            .finish()
    }
}
