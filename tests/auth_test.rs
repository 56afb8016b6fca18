//! Authentication flow tests
//!
//! Endpoint wiring against mockito, plus the login screen's state machine
//! over a fake auth API.

use async_trait::async_trait;
use mockito::{Matcher, Server};
use std::sync::Arc;

use ihenkiri::api::{AccessToken, AuthApi, GuestSession, RequestToken, TmdbClient, TmdbError};
use ihenkiri::models::Session;
use ihenkiri::screens::auth::{
    GUEST_SESSION_ERROR, LOGOUT_ERROR, REQUEST_TOKEN_ERROR, SESSION_ERROR,
};
use ihenkiri::screens::AuthScreen;

// =============================================================================
// Endpoints
// =============================================================================

#[tokio::test]
async fn test_create_request_token_posts_redirect() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/4/auth/request_token")
        .match_header("authorization", "Bearer read_token")
        .match_body(Matcher::Json(serde_json::json!({ "redirect_to": "ihenkiri://auth" })))
        .with_status(200)
        .with_body(r#"{"success":true,"status_code":1,"status_message":"Success.","request_token":"req-123"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("read_token", server.url());
    let token = client
        .create_request_token(Some("ihenkiri://auth"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(token.request_token, "req-123");
}

#[tokio::test]
async fn test_unsuccessful_body_is_an_error() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/4/auth/request_token")
        .with_status(200)
        .with_body(r#"{"success":false,"status_message":"Nope."}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("t", server.url());
    let err = client.create_request_token(None).await.unwrap_err();

    assert!(matches!(err, TmdbError::InvalidResponse(ref msg) if msg.contains("Nope.")));
}

#[tokio::test]
async fn test_login_over_http() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/4/auth/request_token")
        .with_status(200)
        .with_body(r#"{"success":true,"request_token":"req-123"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/4/auth/access_token")
        .match_body(Matcher::Json(serde_json::json!({ "request_token": "req-123" })))
        .with_status(200)
        .with_body(r#"{"success":true,"access_token":"acc-456","account_id":"acct-1"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/3/authentication/session/convert/4")
        .match_body(Matcher::Json(serde_json::json!({ "access_token": "acc-456" })))
        .with_status(200)
        .with_body(r#"{"success":true,"session_id":"sess-789"}"#)
        .create_async()
        .await;

    let api = Arc::new(TmdbClient::with_base_url("t", server.url()));
    let mut screen = AuthScreen::new(api);

    screen.create_request_token().await;
    assert_eq!(
        screen.ui_state().approval_url.as_deref(),
        Some("https://www.themoviedb.org/auth/access?request_token=req-123")
    );

    screen.create_session_id().await;
    let state = screen.ui_state();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.request_token, None);
    assert_eq!(
        state.session,
        Some(Session::User {
            session_id: "sess-789".into(),
            account_id: "acct-1".into(),
            access_token: "acc-456".into(),
        })
    );
}

#[tokio::test]
async fn test_guest_session_over_http() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/3/authentication/guest_session/new")
        .with_status(200)
        .with_body(r#"{"success":true,"guest_session_id":"guest-1","expires_at":"2026-10-19 12:00:00 UTC"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("t", server.url());
    let guest = client.create_guest_session().await.unwrap();

    assert_eq!(guest.guest_session_id, "guest-1");
    assert_eq!(guest.expires_at.as_deref(), Some("2026-10-19 12:00:00 UTC"));
}

#[tokio::test]
async fn test_delete_access_token() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("DELETE", "/4/auth/access_token")
        .match_body(Matcher::Json(serde_json::json!({ "access_token": "acc-456" })))
        .with_status(200)
        .with_body(r#"{"success":true,"status_code":13}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("t", server.url());
    client.delete_access_token("acc-456").await.unwrap();

    mock.assert_async().await;
}

// =============================================================================
// Screen state over a fake API
// =============================================================================

/// Auth API where every call fails
struct FailingAuthApi;

#[async_trait]
impl AuthApi for FailingAuthApi {
    async fn create_request_token(
        &self,
        _redirect_to: Option<&str>,
    ) -> Result<RequestToken, TmdbError> {
        Err(TmdbError::ServerError(500))
    }

    async fn create_access_token(&self, _request_token: &str) -> Result<AccessToken, TmdbError> {
        Err(TmdbError::Unauthorized)
    }

    async fn convert_to_session(&self, _access_token: &str) -> Result<String, TmdbError> {
        Err(TmdbError::Unauthorized)
    }

    async fn create_guest_session(&self) -> Result<GuestSession, TmdbError> {
        Err(TmdbError::ServerError(502))
    }

    async fn delete_access_token(&self, _access_token: &str) -> Result<(), TmdbError> {
        Err(TmdbError::NotFound)
    }
}

#[tokio::test]
async fn test_request_token_failure_sets_error() {
    let mut screen = AuthScreen::new(Arc::new(FailingAuthApi));

    screen.create_request_token().await;

    let state = screen.ui_state();
    assert_eq!(
        state.error.as_deref(),
        Some("Error creating request token, please try again")
    );
    assert_eq!(state.error.as_deref(), Some(REQUEST_TOKEN_ERROR));
    assert!(!state.loading);
    assert_eq!(state.request_token, None);
}

#[tokio::test]
async fn test_session_without_request_token_fails_without_io() {
    let mut screen = AuthScreen::new(Arc::new(FailingAuthApi));

    screen.create_session_id().await;

    assert_eq!(screen.ui_state().error.as_deref(), Some(SESSION_ERROR));
    assert!(!screen.ui_state().loading);
}

#[tokio::test]
async fn test_guest_failure_sets_error() {
    let mut screen = AuthScreen::new(Arc::new(FailingAuthApi));

    screen.create_guest_session().await;

    assert_eq!(screen.ui_state().error.as_deref(), Some(GUEST_SESSION_ERROR));
    assert!(!screen.ui_state().loading);
    assert_eq!(screen.ui_state().session, None);
}

#[tokio::test]
async fn test_logout_user_failure_and_guest_drop() {
    let mut screen = AuthScreen::new(Arc::new(FailingAuthApi));

    let user = Session::User {
        session_id: "s".into(),
        account_id: "a".into(),
        access_token: "t".into(),
    };
    screen.logout(&user).await;
    assert_eq!(screen.ui_state().error.as_deref(), Some(LOGOUT_ERROR));
    assert!(!screen.ui_state().loading);

    // Guest sessions never hit the API
    let guest = Session::Guest {
        guest_session_id: "g".into(),
        expires_at: None,
    };
    screen.logout(&guest).await;
    assert_eq!(screen.ui_state().error, None);
    assert_eq!(screen.ui_state().session, None);
}
