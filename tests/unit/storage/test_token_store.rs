use tasks_client::error::AppError;
use tasks_client::model::auth::{TokenPair, User};
use tasks_client::storage::{MemoryTokenStore, TokenStore};

fn user() -> User {
    User {
        id: 1,
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        first_name: String::new(),
        last_name: String::new(),
    }
}

#[tokio::test]
async fn test_memory_store_starts_empty() {
    let store = MemoryTokenStore::new();
    assert!(store.tokens().await.unwrap().is_none());
    assert!(store.access_token().await.unwrap().is_none());
    assert!(store.refresh_token().await.unwrap().is_none());
    assert!(store.user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_access_token_keeps_refresh_token() {
    let store = MemoryTokenStore::with_tokens(TokenPair::new("old", "refresh"));
    store.set_access_token("new").await.unwrap();

    let tokens = store.tokens().await.unwrap().unwrap();
    assert_eq!(tokens.access, "new");
    assert_eq!(tokens.refresh, "refresh");
}

#[tokio::test]
async fn test_set_access_token_without_pair_fails() {
    let store = MemoryTokenStore::new();
    let result = store.set_access_token("orphan").await;
    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(store.access_token().await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_forgets_everything() {
    let store = MemoryTokenStore::with_tokens(TokenPair::new("a", "r"));
    store.set_user(user()).await.unwrap();
    store.clear().await.unwrap();

    let session = store.load().await.unwrap();
    assert!(session.tokens.is_none());
    assert!(session.user.is_none());
}
