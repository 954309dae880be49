// Common utilities for integration tests

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tasks_client::prelude::*;
use tokio::sync::Notify;

pub const OLD_TOKEN: &str = "old-token";
pub const NEW_TOKEN: &str = "new-token";
pub const REFRESH_TOKEN: &str = "refresh-token";

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Creates a client against the mock server, logged in with an expired access token
pub async fn logged_in_client(server: &ServerGuard) -> (Client, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new(
        OLD_TOKEN,
        REFRESH_TOKEN,
    )));
    (client_with_store(server, store.clone()).await, store)
}

/// Creates a client against the mock server with no stored tokens
pub async fn anonymous_client(server: &ServerGuard) -> (Client, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    (client_with_store(server, store.clone()).await, store)
}

/// Creates a client against the mock server over any token store
pub async fn client_with_store(server: &ServerGuard, store: Arc<dyn TokenStore>) -> Client {
    setup_logger();
    let config = Config::new().with_base_url(server.url());
    Client::with_store(config, store)
        .await
        .expect("Failed to create client")
}

/// Token store that can stall or fail selected operations
#[derive(Debug, Default)]
pub struct ScriptedStore {
    inner: MemoryTokenStore,
    stall_refresh_token: bool,
    fail_user_writes: bool,
    hold_next_access_read: AtomicBool,
    /// Notified once a held access token read has captured its token
    pub parked: Notify,
    /// Lets a held access token read return
    pub release: Notify,
}

impl ScriptedStore {
    /// Holds the expired access token and its refresh token
    pub fn logged_in() -> Self {
        Self {
            inner: MemoryTokenStore::with_tokens(TokenPair::new(OLD_TOKEN, REFRESH_TOKEN)),
            ..Default::default()
        }
    }

    /// Reading the refresh token never completes
    pub fn stalling_refresh_token(mut self) -> Self {
        self.stall_refresh_token = true;
        self
    }

    /// Caching the user profile always fails
    pub fn failing_user_writes(mut self) -> Self {
        self.fail_user_writes = true;
        self
    }

    /// The next access token read captures the current token, then waits
    /// for `release` before returning it
    pub fn hold_next_access_read(&self) {
        self.hold_next_access_read.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TokenStore for ScriptedStore {
    async fn load(&self) -> Result<StoredSession, AppError> {
        self.inner.load().await
    }

    async fn set_tokens(&self, tokens: TokenPair) -> Result<(), AppError> {
        self.inner.set_tokens(tokens).await
    }

    async fn set_access_token(&self, access: &str) -> Result<(), AppError> {
        self.inner.set_access_token(access).await
    }

    async fn set_user(&self, user: User) -> Result<(), AppError> {
        if self.fail_user_writes {
            return Err(AppError::Storage("disk full".to_string()));
        }
        self.inner.set_user(user).await
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.inner.clear().await
    }

    async fn access_token(&self) -> Result<Option<String>, AppError> {
        let token = self.inner.access_token().await?;
        if self.hold_next_access_read.swap(false, Ordering::SeqCst) {
            self.parked.notify_one();
            self.release.notified().await;
        }
        Ok(token)
    }

    async fn refresh_token(&self) -> Result<Option<String>, AppError> {
        if self.stall_refresh_token {
            std::future::pending::<()>().await;
        }
        self.inner.refresh_token().await
    }
}

/// `401` for requests carrying the expired access token
pub async fn mock_expired(server: &mut ServerGuard, method: &str, path: &str) -> Mock {
    server
        .mock(method, path)
        .match_header("authorization", bearer(OLD_TOKEN).as_str())
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "detail": "Given token not valid for any token type",
                "code": "token_not_valid"
            })
            .to_string(),
        )
        .create_async()
        .await
}

/// Successful answer for requests carrying the renewed access token
pub async fn mock_renewed(server: &mut ServerGuard, method: &str, path: &str, body: Value) -> Mock {
    server
        .mock(method, path)
        .match_header("authorization", bearer(NEW_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Refresh endpoint issuing the new access token, expected exactly once
pub async fn mock_refresh_ok(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/auth/refresh/")
        .match_body(Matcher::Json(json!({ "refresh": REFRESH_TOKEN })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "access": NEW_TOKEN }).to_string())
        .expect(1)
        .create_async()
        .await
}

/// Refresh endpoint rejecting the refresh token, expected exactly once
pub async fn mock_refresh_rejected(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/auth/refresh/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "Token is blacklisted", "code": "token_not_valid" }).to_string())
        .expect(1)
        .create_async()
        .await
}

pub fn user_json() -> Value {
    json!({
        "id": 7,
        "email": "ada@example.com",
        "username": "ada",
        "first_name": "Ada",
        "last_name": "Lovelace"
    })
}

pub fn task_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "category": null,
        "category_details": null,
        "status": "pending",
        "priority": "medium",
        "due_date": null,
        "completed_at": null,
        "created_at": "2026-10-18T09:30:00Z",
        "updated_at": "2026-10-18T09:30:00Z",
        "is_completed": false,
        "is_overdue": false,
        "subtasks": [],
        "subtask_progress": null
    })
}

pub fn category_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "icon": "📁",
        "color": "#6b7280",
        "task_count": 0,
        "created_at": "2026-10-01T08:00:00Z",
        "updated_at": "2026-10-01T08:00:00Z"
    })
}

pub fn subtask_json(id: u64, title: &str, is_completed: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "is_completed": is_completed,
        "completed_at": null,
        "order": 0,
        "created_at": "2026-10-18T09:31:00Z"
    })
}

pub fn statistics_json() -> Value {
    json!({ "total": 4, "pending": 1, "in_progress": 1, "completed": 2 })
}
