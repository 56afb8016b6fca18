//! Login flow state
//!
//! `create_request_token` → user approves in a browser →
//! `create_session_id`; or `create_guest_session` for anonymous use. Each
//! step goes idle → loading → success | error.

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::auth::approval_url;
use crate::api::AuthApi;
use crate::models::Session;

pub const REQUEST_TOKEN_ERROR: &str = "Error creating request token, please try again";
pub const SESSION_ERROR: &str = "Error creating session, please try again";
pub const GUEST_SESSION_ERROR: &str = "Error creating guest session, please try again";
pub const LOGOUT_ERROR: &str = "Error logging out, please try again";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUiState {
    pub loading: bool,
    pub error: Option<String>,
    /// Token waiting for user approval
    pub request_token: Option<String>,
    /// Where the user approves `request_token`
    pub approval_url: Option<String>,
    pub session: Option<Session>,
}

pub struct AuthScreen {
    api: Arc<dyn AuthApi>,
    redirect_to: Option<String>,
    state: AuthUiState,
}

impl std::fmt::Debug for AuthScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthScreen")
            .field("redirect_to", &self.redirect_to)
            .field("state", &self.state)
            .finish()
    }
}

impl AuthScreen {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            redirect_to: None,
            state: AuthUiState::default(),
        }
    }

    /// URL TMDB redirects to once the user approved the token
    pub fn with_redirect(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    pub fn ui_state(&self) -> &AuthUiState {
        &self.state
    }

    fn start(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    fn fail(&mut self, msg: &str) {
        self.state.loading = false;
        self.state.error = Some(msg.to_string());
    }

    pub async fn create_request_token(&mut self) {
        self.start();
        match self.api.create_request_token(self.redirect_to.as_deref()).await {
            Ok(token) => {
                self.state.approval_url = Some(approval_url(&token.request_token));
                self.state.request_token = Some(token.request_token);
                self.state.loading = false;
            }
            Err(e) => {
                warn!(error = %e, "request token failed");
                self.fail(REQUEST_TOKEN_ERROR);
            }
        }
    }

    /// Exchange the approved request token for a user session
    pub async fn create_session_id(&mut self) {
        let Some(request_token) = self.state.request_token.clone() else {
            self.fail(SESSION_ERROR);
            return;
        };

        self.start();
        let api = Arc::clone(&self.api);
        let result = async {
            let access = api.create_access_token(&request_token).await?;
            let session_id = api.convert_to_session(&access.access_token).await?;
            Ok::<_, crate::api::TmdbError>(Session::User {
                session_id,
                account_id: access.account_id,
                access_token: access.access_token,
            })
        }
        .await;

        match result {
            Ok(session) => {
                info!("user session created");
                self.state.request_token = None;
                self.state.approval_url = None;
                self.state.session = Some(session);
                self.state.loading = false;
            }
            Err(e) => {
                warn!(error = %e, "session creation failed");
                self.fail(SESSION_ERROR);
            }
        }
    }

    pub async fn create_guest_session(&mut self) {
        self.start();
        match self.api.create_guest_session().await {
            Ok(guest) => {
                info!("guest session created");
                self.state.session = Some(Session::Guest {
                    guest_session_id: guest.guest_session_id,
                    expires_at: guest.expires_at,
                });
                self.state.loading = false;
            }
            Err(e) => {
                warn!(error = %e, "guest session failed");
                self.fail(GUEST_SESSION_ERROR);
            }
        }
    }

    /// Revoke `session`. Guest sessions expire on their own and are just dropped.
    pub async fn logout(&mut self, session: &Session) {
        self.start();
        if let Session::User { access_token, .. } = session {
            if let Err(e) = self.api.delete_access_token(access_token).await {
                warn!(error = %e, "logout failed");
                self.fail(LOGOUT_ERROR);
                return;
            }
        }
        self.state.session = None;
        self.state.loading = false;
    }
}
