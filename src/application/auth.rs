/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Session management for the tasks API
//!
//! This module provides the authentication entry points:
//! - Email/password login and registration
//! - Google sign-in (ID token exchange)
//! - Best-effort logout
//! - Current user profile, cached next to the tokens
//!
//! Token renewal itself happens transparently inside
//! [`HttpClient`](crate::model::http::HttpClient).

use crate::constants::{GOOGLE_AUTH_PATH, LOGIN_PATH, LOGOUT_PATH, ME_PATH, REGISTER_PATH};
use crate::error::AppError;
use crate::model::auth::{
    AuthResponse, GoogleLoginRequest, LoginRequest, LogoutRequest, RegisterRequest, User,
};
use crate::model::http::{ApiRequest, HttpClient};
use crate::session::state::{AuthState, SessionEvent};
use reqwest::Method;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Authentication manager for the tasks API
///
/// Handles all session operations including:
/// - Login with email/password or Google
/// - Registration
/// - Logout
/// - Cached user profile
pub struct Auth {
    http_client: Arc<HttpClient>,
}

impl Auth {
    /// Creates a new Auth instance over a shared HTTP client
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Logs in with email and password
    ///
    /// # Returns
    /// * `Ok(User)` - Authenticated user; tokens are stored
    /// * `Err(AppError::InvalidCredentials)` - If the backend rejects the credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        debug!("Logging in as {}", email);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.http_client.post(LOGIN_PATH, &request).await?;
        self.start_session(response).await
    }

    /// Creates an account and logs into it
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        if request.password != request.password2 {
            return Err(AppError::InvalidInput("passwords do not match".to_string()));
        }
        debug!("Registering {}", request.email);
        let response: AuthResponse = self.http_client.post(REGISTER_PATH, request).await?;
        self.start_session(response).await
    }

    /// Exchanges a Google ID token for a session
    ///
    /// # Arguments
    /// * `credential` - ID token returned by Google Sign-In
    pub async fn login_with_google(&self, credential: &str) -> Result<User, AppError> {
        if credential.trim().is_empty() {
            return Err(AppError::InvalidInput("empty Google credential".to_string()));
        }
        debug!("Logging in with Google");
        let request = GoogleLoginRequest {
            token: credential.to_string(),
        };
        let response: AuthResponse = self.http_client.post(GOOGLE_AUTH_PATH, &request).await?;
        self.start_session(response).await
    }

    async fn start_session(&self, response: AuthResponse) -> Result<User, AppError> {
        let (user, tokens) = response.into_parts();
        let store = self.http_client.store();
        store.set_tokens(tokens).await?;
        if let Err(e) = store.set_user(user.clone()).await {
            // Tokens and profile are kept together or not at all
            warn!("Failed to cache user profile, discarding tokens: {}", e);
            if let Err(clear_error) = store.clear().await {
                error!("Failed to clear stored tokens: {}", clear_error);
            }
            return Err(e);
        }
        self.http_client.session().logged_in();
        info!("✓ Login successful, user: {}", user.email);
        Ok(user)
    }

    /// Logs out
    ///
    /// The backend is asked to blacklist the refresh token, but any failure
    /// there is only logged: the local session is always cleared.
    pub async fn logout(&self) -> Result<(), AppError> {
        info!("Logging out");
        let store = self.http_client.store();

        match store.refresh_token().await {
            Ok(Some(refresh)) => {
                let request = ApiRequest::new(Method::POST, LOGOUT_PATH)
                    .with_json(&LogoutRequest { refresh: &refresh })?;
                if let Err(e) = self.http_client.send(&request).await {
                    warn!("Logout request failed, clearing local session anyway: {}", e);
                }
            }
            Ok(None) => debug!("No refresh token stored, skipping logout request"),
            Err(e) => warn!("Could not read refresh token for logout: {}", e),
        }

        store.clear().await?;
        self.http_client.session().logged_out();
        info!("✓ Logged out successfully");
        Ok(())
    }

    /// Fetches the current user profile and updates the cache
    pub async fn current_user(&self) -> Result<User, AppError> {
        let user: User = self.http_client.get(ME_PATH).await?;
        self.http_client.store().set_user(user.clone()).await?;
        Ok(user)
    }

    /// Cached user profile, without a network call
    pub async fn cached_user(&self) -> Result<Option<User>, AppError> {
        self.http_client.store().user().await
    }

    /// Whether a token pair is stored
    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.http_client.store().tokens().await?.is_some())
    }

    /// Current auth state
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.http_client.auth_state()
    }

    /// Receiver for session events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.http_client.subscribe()
    }
}
