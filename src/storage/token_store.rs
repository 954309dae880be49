/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Token persistence
//!
//! The access/refresh pair is written and cleared as a unit. The only partial
//! update allowed is replacing the access token after a refresh, and only
//! while a pair is stored.

use crate::error::AppError;
use crate::model::auth::{TokenPair, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Everything a token store keeps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Token pair, if logged in
    #[serde(default)]
    pub tokens: Option<TokenPair>,
    /// Cached user profile
    #[serde(default)]
    pub user: Option<User>,
}

impl StoredSession {
    /// Replaces the access token of the stored pair
    ///
    /// # Errors
    /// `AppError::Storage` when no pair is stored; a lone access token is
    /// never created.
    pub fn replace_access(&mut self, access: &str) -> Result<(), AppError> {
        match self.tokens.as_mut() {
            Some(tokens) => {
                tokens.access = access.to_string();
                Ok(())
            }
            None => Err(AppError::Storage(
                "no token pair stored, cannot replace access token".to_string(),
            )),
        }
    }
}

/// Storage collaborator for tokens and the cached user profile
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Snapshot of the stored session
    async fn load(&self) -> Result<StoredSession, AppError>;

    /// Stores a new token pair, replacing both tokens
    async fn set_tokens(&self, tokens: TokenPair) -> Result<(), AppError>;

    /// Replaces the access token, keeping the refresh token
    async fn set_access_token(&self, access: &str) -> Result<(), AppError>;

    /// Caches the user profile
    async fn set_user(&self, user: User) -> Result<(), AppError>;

    /// Forgets tokens and user
    async fn clear(&self) -> Result<(), AppError>;

    /// Stored token pair
    async fn tokens(&self) -> Result<Option<TokenPair>, AppError> {
        Ok(self.load().await?.tokens)
    }

    /// Stored access token
    async fn access_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.tokens().await?.map(|tokens| tokens.access))
    }

    /// Stored refresh token
    async fn refresh_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.tokens().await?.map(|tokens| tokens.refresh))
    }

    /// Cached user profile
    async fn user(&self) -> Result<Option<User>, AppError> {
        Ok(self.load().await?.user)
    }
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: RwLock<StoredSession>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a token pair
    #[must_use]
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            session: RwLock::new(StoredSession {
                tokens: Some(tokens),
                user: None,
            }),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<StoredSession, AppError> {
        Ok(self.session.read().await.clone())
    }

    async fn set_tokens(&self, tokens: TokenPair) -> Result<(), AppError> {
        self.session.write().await.tokens = Some(tokens);
        Ok(())
    }

    async fn set_access_token(&self, access: &str) -> Result<(), AppError> {
        self.session.write().await.replace_access(access)
    }

    async fn set_user(&self, user: User) -> Result<(), AppError> {
        self.session.write().await.user = Some(user);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.session.write().await = StoredSession::default();
        Ok(())
    }
}
