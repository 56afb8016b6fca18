//! TMDB authentication endpoints
//!
//! v4 request-token flow (request token → user approval → access token),
//! the v3 session conversion, and guest sessions.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::tmdb::{TmdbClient, TmdbError};

/// Page where the user approves a request token
pub const APPROVAL_URL: &str = "https://www.themoviedb.org/auth/access";

/// Approval URL for a freshly created request token
pub fn approval_url(request_token: &str) -> String {
    format!(
        "{}?request_token={}",
        APPROVAL_URL,
        urlencoding::encode(request_token)
    )
}

/// Unapproved request token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
    pub request_token: String,
}

/// Access token obtained by exchanging an approved request token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSession {
    pub guest_session_id: String,
    pub expires_at: Option<String>,
}

/// Auth operations the login flow depends on
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create a request token, optionally redirecting to `redirect_to` after approval
    async fn create_request_token(
        &self,
        redirect_to: Option<&str>,
    ) -> Result<RequestToken, TmdbError>;

    /// Exchange an approved request token for an access token
    async fn create_access_token(&self, request_token: &str) -> Result<AccessToken, TmdbError>;

    /// Convert a v4 access token into a v3 session id
    async fn convert_to_session(&self, access_token: &str) -> Result<String, TmdbError>;

    async fn create_guest_session(&self) -> Result<GuestSession, TmdbError>;

    /// Revoke an access token (logout)
    async fn delete_access_token(&self, access_token: &str) -> Result<(), TmdbError>;
}

// =============================================================================
// Wire Structures
// =============================================================================

#[derive(Debug, Serialize)]
struct RequestTokenBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RequestTokenRef<'a> {
    request_token: &'a str,
}

#[derive(Debug, Serialize)]
struct AccessTokenRef<'a> {
    access_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RequestTokenResponse {
    success: bool,
    status_message: Option<String>,
    request_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    success: bool,
    status_message: Option<String>,
    access_token: Option<String>,
    account_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    success: bool,
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GuestSessionResponse {
    success: bool,
    guest_session_id: Option<String>,
    expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    success: bool,
    status_message: Option<String>,
}

fn unsuccessful(what: &str, message: Option<String>) -> TmdbError {
    TmdbError::InvalidResponse(match message {
        Some(msg) => format!("{} failed: {}", what, msg),
        None => format!("{} failed", what),
    })
}

#[async_trait]
impl AuthApi for TmdbClient {
    async fn create_request_token(
        &self,
        redirect_to: Option<&str>,
    ) -> Result<RequestToken, TmdbError> {
        let response: RequestTokenResponse = self
            .send_json(
                Method::POST,
                "/4/auth/request_token",
                &RequestTokenBody { redirect_to },
            )
            .await?;

        match response.request_token {
            Some(request_token) if response.success => Ok(RequestToken { request_token }),
            _ => Err(unsuccessful("request token", response.status_message)),
        }
    }

    async fn create_access_token(&self, request_token: &str) -> Result<AccessToken, TmdbError> {
        let response: AccessTokenResponse = self
            .send_json(
                Method::POST,
                "/4/auth/access_token",
                &RequestTokenRef { request_token },
            )
            .await?;

        match (response.access_token, response.account_id) {
            (Some(access_token), Some(account_id)) if response.success => Ok(AccessToken {
                access_token,
                account_id,
            }),
            _ => Err(unsuccessful("access token", response.status_message)),
        }
    }

    async fn convert_to_session(&self, access_token: &str) -> Result<String, TmdbError> {
        let response: SessionResponse = self
            .send_json(
                Method::POST,
                "/3/authentication/session/convert/4",
                &AccessTokenRef { access_token },
            )
            .await?;

        match response.session_id {
            Some(session_id) if response.success => Ok(session_id),
            _ => Err(unsuccessful("session conversion", None)),
        }
    }

    async fn create_guest_session(&self) -> Result<GuestSession, TmdbError> {
        let response: GuestSessionResponse = self
            .get("/3/authentication/guest_session/new", &[])
            .await?;

        match response.guest_session_id {
            Some(guest_session_id) if response.success => Ok(GuestSession {
                guest_session_id,
                expires_at: response.expires_at,
            }),
            _ => Err(unsuccessful("guest session", None)),
        }
    }

    async fn delete_access_token(&self, access_token: &str) -> Result<(), TmdbError> {
        let response: StatusResponse = self
            .send_json(
                Method::DELETE,
                "/4/auth/access_token",
                &AccessTokenRef { access_token },
            )
            .await?;

        if response.success {
            Ok(())
        } else {
            Err(unsuccessful("logout", response.status_message))
        }
    }
}
