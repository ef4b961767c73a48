//! Authentication lifecycle for the admin panel.
//!
//! A stored token is never trusted on its own: both startup and login finish with
//! a "who am I" check, and a failed check clears the token.

use std::sync::Mutex;

use vitrine_client::{ApiClient, Result};
use vitrine_common::models::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(User),
}

pub struct SessionGate {
    api: ApiClient,
    state: Mutex<SessionState>,
}

impl SessionGate {
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: Mutex::new(SessionState::Unauthenticated) }
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn user(&self) -> Option<User> {
        match self.state() {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), SessionState::Authenticated(_))
    }

    fn set(&self, state: SessionState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Resume a stored session. Without a token this makes no network call.
    pub async fn start(&self) -> SessionState {
        if !self.api.has_token() {
            self.set(SessionState::Unauthenticated);
            return SessionState::Unauthenticated;
        }
        // A failed check has already cleared the token and been logged.
        let _ = self.verify().await;
        self.state()
    }

    /// Exchange credentials, store the token, then prove it with a "who am I" check.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        self.set(SessionState::Authenticating);
        if let Err(e) = self.api.login(username, password).await {
            self.set(SessionState::Unauthenticated);
            return Err(e);
        }
        self.verify().await
    }

    /// Forget the session. The state is reset even if the token file cannot be
    /// rewritten; that failure is still reported.
    pub fn logout(&self) -> Result<()> {
        self.set(SessionState::Unauthenticated);
        let cleared = self.api.clear_token();
        tracing::info!("logged out");
        cleared
    }

    async fn verify(&self) -> Result<User> {
        self.set(SessionState::Authenticating);
        match self.api.me().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "session established");
                self.set(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("session check failed, clearing token: {e}");
                if let Err(clear) = self.api.clear_token() {
                    tracing::warn!("could not clear stored token: {clear}");
                }
                self.set(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }
}
