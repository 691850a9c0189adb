//! Session state
//!
//! The console never deals with authentication mechanics. An
//! [`AuthProvider`] does the talking; [`AuthContainer`] only tracks who is
//! signed in and turns provider failures into user-facing messages.

use crate::messages::{
    LOGIN_FAILED, LOGIN_REJECTED, REGISTER_FAILED, REGISTER_REJECTED, SESSION_UNAVAILABLE,
};
use async_trait::async_trait;
use serde::Serialize;
use siga_core::{AuthUser, Credentials, Registration, Result, SigaError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Role assumed for users whose profile carries none
pub const DEFAULT_ROLE: &str = "admin";

/// Authentication collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthUser>;

    async fn register(&self, registration: &Registration) -> Result<AuthUser>;

    async fn logout(&self) -> Result<()>;

    /// User of the session persisted by the provider, if any
    async fn current_user(&self) -> Result<Option<AuthUser>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<AuthUser>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess(AuthUser),
    LoginFailure(String),
    Logout,
    SetLoading(bool),
}

pub fn reduce_auth(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::LoginStart => {
            state.loading = true;
            state.error = None;
        }
        AuthAction::LoginSuccess(user) => {
            state.loading = false;
            state.is_authenticated = true;
            state.user = Some(user);
            state.error = None;
        }
        AuthAction::LoginFailure(message) => {
            state.loading = false;
            state.is_authenticated = false;
            state.user = None;
            state.error = Some(message);
        }
        AuthAction::Logout => {
            state.is_authenticated = false;
            state.user = None;
            state.error = None;
        }
        AuthAction::SetLoading(loading) => state.loading = loading,
    }
}

pub struct AuthContainer {
    provider: Arc<dyn AuthProvider>,
    state: watch::Sender<AuthState>,
    default_role: String,
}

impl AuthContainer {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            provider,
            state,
            default_role: DEFAULT_ROLE.to_string(),
        }
    }

    #[must_use]
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Role of the signed-in user, falling back to the configured default
    pub fn role(&self) -> Option<String> {
        self.state
            .borrow()
            .user
            .as_ref()
            .map(|user| user.role_or(&self.default_role).to_string())
    }

    /// Pick up a session the provider already holds
    pub async fn restore_session(&self) -> Result<Option<AuthUser>> {
        self.dispatch(AuthAction::SetLoading(true));

        let result = match self.provider.current_user().await {
            Ok(Some(user)) => {
                self.dispatch(AuthAction::LoginSuccess(user.clone()));
                Ok(Some(user))
            }
            Ok(None) => {
                self.dispatch(AuthAction::Logout);
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "Session restore failed");
                self.dispatch(AuthAction::LoginFailure(SESSION_UNAVAILABLE.to_string()));
                Err(err)
            }
        };

        self.dispatch(AuthAction::SetLoading(false));
        result
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthUser> {
        self.dispatch(AuthAction::LoginStart);

        match self.provider.login(credentials).await {
            Ok(user) => {
                info!(uid = %user.uid, "Signed in");
                self.dispatch(AuthAction::LoginSuccess(user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.reject(err, LOGIN_REJECTED, LOGIN_FAILED)),
        }
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthUser> {
        self.dispatch(AuthAction::LoginStart);

        match self.provider.register(registration).await {
            Ok(user) => {
                info!(uid = %user.uid, "Account created");
                self.dispatch(AuthAction::LoginSuccess(user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.reject(err, REGISTER_REJECTED, REGISTER_FAILED)),
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.provider.logout().await?;
        self.dispatch(AuthAction::Logout);
        Ok(())
    }

    fn dispatch(&self, action: AuthAction) {
        self.state.send_modify(|state| reduce_auth(state, action));
    }

    /// Record a failure; provider rejections get the specific message
    fn reject(&self, err: SigaError, rejected: &str, failed: &str) -> SigaError {
        let message = if err.is_auth() { rejected } else { failed };
        warn!(error = %err, "Authentication failed");
        self.dispatch(AuthAction::LoginFailure(message.to_string()));
        err
    }
}
