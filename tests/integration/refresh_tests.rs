use crate::common::{
    self, NEW_TOKEN, OLD_TOKEN, REFRESH_TOKEN, ScriptedStore, bearer, client_with_store,
    logged_in_client, mock_expired, mock_refresh_ok, mock_refresh_rejected, mock_renewed,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use tasks_client::prelude::*;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn test_expired_token_is_refreshed_transparently() {
    let mut server = Server::new_async().await;
    let expired = mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = mock_refresh_ok(&mut server).await;
    let renewed = mock_renewed(
        &mut server,
        "GET",
        "/tasks/statistics/",
        common::statistics_json(),
    )
    .await;

    let (client, store) = logged_in_client(&server).await;
    let mut events = client.subscribe();

    let stats = client.get_statistics().await.expect("request should succeed");
    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 2);

    let tokens = store.tokens().await.unwrap().unwrap();
    assert_eq!(tokens.access, NEW_TOKEN);
    assert_eq!(tokens.refresh, REFRESH_TOKEN);
    assert_eq!(client.auth_state(), AuthState::Authenticated);
    assert_eq!(events.try_recv().unwrap(), SessionEvent::TokenRefreshed);
    assert!(!client.http_client().is_refreshing());

    expired.assert_async().await;
    refresh.assert_async().await;
    renewed.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_rejections_share_one_refresh() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/").await;
    mock_expired(&mut server, "GET", "/categories/").await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = mock_refresh_ok(&mut server).await;
    let tasks = mock_renewed(
        &mut server,
        "GET",
        "/tasks/",
        json!([common::task_json(1, "Buy milk")]),
    )
    .await;
    let categories = mock_renewed(
        &mut server,
        "GET",
        "/categories/",
        json!([common::category_json(2, "Home")]),
    )
    .await;
    let statistics = mock_renewed(
        &mut server,
        "GET",
        "/tasks/statistics/",
        common::statistics_json(),
    )
    .await;

    let (client, store) = logged_in_client(&server).await;
    let mut events = client.subscribe();

    let filters = TaskFilters::default();
    let (tasks_result, categories_result, statistics_result) = tokio::join!(
        client.list_tasks(&filters),
        client.list_categories(),
        client.get_statistics(),
    );

    assert_eq!(tasks_result.unwrap()[0].title, "Buy milk");
    assert_eq!(categories_result.unwrap()[0].name, "Home");
    assert_eq!(statistics_result.unwrap().total, 4);
    assert_eq!(store.access_token().await.unwrap().as_deref(), Some(NEW_TOKEN));

    assert_eq!(events.try_recv().unwrap(), SessionEvent::TokenRefreshed);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    refresh.assert_async().await;
    tasks.assert_async().await;
    categories.assert_async().await;
    statistics.assert_async().await;
}

#[tokio::test]
async fn test_refresh_request_body_carries_refresh_token() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/auth/me/").await;
    // Only matches when the body is exactly {"refresh": "refresh-token"}
    let refresh = mock_refresh_ok(&mut server).await;
    mock_renewed(&mut server, "GET", "/auth/me/", common::user_json()).await;

    let (client, _) = logged_in_client(&server).await;
    let user = client.auth().current_user().await.unwrap();
    assert_eq!(user.email, "ada@example.com");

    refresh.assert_async().await;
}

#[tokio::test]
async fn test_refresh_failure_clears_session() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = mock_refresh_rejected(&mut server).await;

    let (client, store) = logged_in_client(&server).await;
    let mut events = client.subscribe();

    let result = client.get_statistics().await;
    match result {
        Err(AppError::RefreshFailed(message)) => assert_eq!(message, "Token is blacklisted"),
        other => panic!("expected refresh failure, got {other:?}"),
    }

    assert!(store.tokens().await.unwrap().is_none());
    assert_eq!(client.auth_state(), AuthState::Unauthenticated);
    assert_eq!(events.try_recv().unwrap(), SessionEvent::SessionExpired);

    refresh.assert_async().await;
}

#[tokio::test]
async fn test_requests_after_expiry_go_out_without_token() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = mock_refresh_rejected(&mut server).await;
    let anonymous = server
        .mock("GET", "/tasks/")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(json!({ "detail": "Authentication credentials were not provided." }).to_string())
        .expect(1)
        .create_async()
        .await;

    let (client, _) = logged_in_client(&server).await;
    assert!(client.get_statistics().await.is_err());

    // No refresh token is left, so no second refresh call is made
    let result = client.list_tasks(&TaskFilters::default()).await;
    match result {
        Err(AppError::RefreshFailed(message)) => assert_eq!(message, NO_REFRESH_TOKEN_MESSAGE),
        other => panic!("expected refresh failure, got {other:?}"),
    }

    refresh.assert_async().await;
    anonymous.assert_async().await;
}

#[tokio::test]
async fn test_refresh_failure_fails_every_queued_request() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/").await;
    mock_expired(&mut server, "GET", "/categories/").await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = mock_refresh_rejected(&mut server).await;

    let (client, store) = logged_in_client(&server).await;
    let mut events = client.subscribe();

    let filters = TaskFilters::default();
    let (tasks_result, categories_result, statistics_result) = tokio::join!(
        client.list_tasks(&filters),
        client.list_categories(),
        client.get_statistics(),
    );

    assert!(matches!(tasks_result, Err(AppError::RefreshFailed(_))));
    assert!(matches!(categories_result, Err(AppError::RefreshFailed(_))));
    assert!(matches!(statistics_result, Err(AppError::RefreshFailed(_))));
    assert!(store.tokens().await.unwrap().is_none());

    assert_eq!(events.try_recv().unwrap(), SessionEvent::SessionExpired);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    refresh.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_after_refresh_is_final() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/12/").await;
    let refresh = mock_refresh_ok(&mut server).await;
    let rejected_again = server
        .mock("GET", "/tasks/12/")
        .match_header("authorization", bearer(NEW_TOKEN).as_str())
        .with_status(401)
        .with_body(json!({ "detail": "User is inactive", "code": "user_inactive" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let (client, _) = logged_in_client(&server).await;
    let result = client.get_task(12).await;
    match result {
        Err(AppError::Unauthorized(message)) => assert_eq!(message, "User is inactive"),
        other => panic!("expected unauthorized, got {other:?}"),
    }

    refresh.assert_async().await;
    rejected_again.assert_async().await;
}

#[tokio::test]
async fn test_refresh_server_error_is_reported() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .expect(1)
        .create_async()
        .await;

    let (client, store) = logged_in_client(&server).await;
    let result = client.get_statistics().await;
    match result {
        Err(AppError::RefreshFailed(message)) => assert_eq!(message, SERVER_ERROR_MESSAGE),
        other => panic!("expected refresh failure, got {other:?}"),
    }
    assert!(store.tokens().await.unwrap().is_none());

    refresh.assert_async().await;
}

#[tokio::test]
async fn test_other_errors_do_not_refresh() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .expect(0)
        .create_async()
        .await;
    server
        .mock("GET", "/tasks/99/")
        .with_status(404)
        .with_body(json!({ "detail": "No Task matches the given query." }).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/tasks/statistics/")
        .with_status(403)
        .with_body("")
        .create_async()
        .await;

    let (client, _) = logged_in_client(&server).await;

    match client.get_task(99).await {
        Err(AppError::Api { status, message }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "No Task matches the given query.");
        }
        other => panic!("expected api error, got {other:?}"),
    }
    match client.get_statistics().await {
        Err(e) => {
            assert_eq!(e.status(), Some(StatusCode::FORBIDDEN));
            assert_eq!(e.user_message(), FORBIDDEN_MESSAGE);
        }
        Ok(stats) => panic!("expected forbidden, got {stats:?}"),
    }

    refresh.assert_async().await;
}

#[tokio::test]
async fn test_rejection_after_settled_refresh_replays_without_refreshing() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let late_rejection = mock_expired(&mut server, "GET", "/categories/").await;
    let refresh = mock_refresh_ok(&mut server).await;
    mock_renewed(
        &mut server,
        "GET",
        "/tasks/statistics/",
        common::statistics_json(),
    )
    .await;
    let replayed = mock_renewed(
        &mut server,
        "GET",
        "/categories/",
        json!([common::category_json(2, "Home")]),
    )
    .await;

    let store = Arc::new(ScriptedStore::logged_in());
    let client = Arc::new(client_with_store(&server, store.clone()).await);
    let mut events = client.subscribe();

    // The late request captures the expired token, then waits for the refresh to finish
    store.hold_next_access_read();
    let late = tokio::spawn({
        let client = client.clone();
        async move { client.list_categories().await }
    });
    store.parked.notified().await;

    let stats = client.get_statistics().await.unwrap();
    assert_eq!(stats.total, 4);
    assert!(!client.http_client().is_refreshing());

    store.release.notify_one();
    let categories = late.await.unwrap().unwrap();
    assert_eq!(categories[0].name, "Home");

    assert_eq!(events.try_recv().unwrap(), SessionEvent::TokenRefreshed);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    refresh.assert_async().await;
    late_rejection.assert_async().await;
    replayed.assert_async().await;
}

#[tokio::test]
async fn test_cancelled_refresh_leaves_session_authenticated() {
    let mut server = Server::new_async().await;
    mock_expired(&mut server, "GET", "/tasks/statistics/").await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .expect(0)
        .create_async()
        .await;

    let store = Arc::new(ScriptedStore::logged_in().stalling_refresh_token());
    let client = client_with_store(&server, store.clone()).await;
    let mut events = client.subscribe();

    let result = tokio::time::timeout(Duration::from_millis(300), client.get_statistics()).await;
    assert!(result.is_err(), "refresh should still be stalled");

    assert!(!client.http_client().is_refreshing());
    assert_eq!(client.auth_state(), AuthState::Authenticated);
    assert_eq!(
        *client.http_client().watch_state().borrow(),
        AuthState::Authenticated
    );
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(
        store.access_token().await.unwrap().as_deref(),
        Some(OLD_TOKEN)
    );

    refresh.assert_async().await;
}
