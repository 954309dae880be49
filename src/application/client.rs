/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! High-level client for the tasks API
//!
//! # Example
//! ```ignore
//! use tasks_client::prelude::*;
//!
//! let client = Client::new(Config::new()).await?;
//! client.auth().login("ada@example.com", "secret").await?;
//!
//! // Token refresh is handled transparently
//! let stats = client.get_statistics().await?;
//! ```

use crate::application::auth::Auth;
use crate::application::config::Config;
use crate::error::AppError;
use crate::model::http::HttpClient;
use crate::session::state::{AuthState, SessionEvent};
use crate::storage::file_store::FileTokenStore;
use crate::storage::token_store::{MemoryTokenStore, TokenStore};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Client for the tasks API
///
/// Implements [`TaskService`](crate::application::interfaces::task::TaskService),
/// [`CategoryService`](crate::application::interfaces::category::CategoryService)
/// and [`SubtaskService`](crate::application::interfaces::subtask::SubtaskService);
/// session operations live in [`Auth`].
pub struct Client {
    http_client: Arc<HttpClient>,
    auth: Auth,
}

impl Client {
    /// Creates a client with the token store selected by the configuration
    ///
    /// Tokens are persisted to `storage.token_file` when it is set and kept
    /// in memory otherwise.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let store: Arc<dyn TokenStore> = match &config.storage.token_file {
            Some(path) => {
                debug!("Persisting tokens to {}", path);
                Arc::new(FileTokenStore::open(path).await?)
            }
            None => Arc::new(MemoryTokenStore::new()),
        };
        Self::with_store(config, store).await
    }

    /// Creates a client over a caller-provided token store
    pub async fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let http_client = Arc::new(HttpClient::new(Arc::new(config), store).await?);
        let auth = Auth::new(http_client.clone());
        Ok(Self { http_client, auth })
    }

    /// Session operations
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Underlying authenticated transport, for endpoints without a typed wrapper
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Current auth state
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.http_client.auth_state()
    }

    /// Receiver for session events; `SessionExpired` means "show the login view"
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.http_client.subscribe()
    }
}
