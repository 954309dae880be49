/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access/refresh token pair issued by the authentication endpoints
///
/// Both tokens are persisted and cleared together; only the access token is
/// replaced on refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived token sent as `Authorization: Bearer <access>`
    pub access: String,
    /// Longer-lived token used to mint new access tokens
    pub refresh: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Authenticated user profile, as returned by `auth/me/` and the login family
#[derive(Debug, DisplaySimple, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: u64,
    /// Email address
    pub email: String,
    /// Username
    #[serde(default)]
    pub username: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// Full name, falling back on the username and then on the email
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if !full.is_empty() {
            full.to_string()
        } else if !self.username.is_empty() {
            self.username.clone()
        } else {
            self.email.clone()
        }
    }
}

/// Credentials for `auth/login/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Payload for `auth/register/`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Account email
    pub email: String,
    /// Desired username
    pub username: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub password2: String,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl RegisterRequest {
    /// Creates a registration request where the confirmation matches the password
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            email: email.into(),
            username: username.into(),
            password2: password.clone(),
            password,
            first_name: None,
            last_name: None,
        }
    }

    /// Sets first and last name
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }
}

/// Google credential exchange for `auth/google/`
#[derive(Debug, Clone, Serialize)]
pub struct GoogleLoginRequest {
    /// ID token obtained from Google Sign-In
    pub token: String,
}

/// Body of `auth/refresh/`
#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Answer of `auth/refresh/`
///
/// A rotated refresh token, if the backend sends one, is not
/// read: only the access token changes on refresh.
#[derive(Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
}

/// Body of `auth/logout/`
#[derive(Serialize)]
pub(crate) struct LogoutRequest<'a> {
    pub refresh: &'a str,
}

/// Answer of the login, register and Google endpoints
///
/// The backend nests the tokens under `tokens` on some endpoints and inlines
/// them on others; both shapes are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthResponse {
    /// `{ "user": {..}, "tokens": { "access": .., "refresh": .. } }`
    Nested {
        /// Authenticated user
        user: User,
        /// Issued tokens
        tokens: TokenPair,
    },
    /// `{ "user": {..}, "access": .., "refresh": .. }`
    Flat {
        /// Authenticated user
        user: User,
        /// Access token
        access: String,
        /// Refresh token
        refresh: String,
    },
}

impl AuthResponse {
    /// Splits the response into the user profile and the token pair
    #[must_use]
    pub fn into_parts(self) -> (User, TokenPair) {
        match self {
            AuthResponse::Nested { user, tokens } => (user, tokens),
            AuthResponse::Flat {
                user,
                access,
                refresh,
            } => (user, TokenPair { access, refresh }),
        }
    }
}
