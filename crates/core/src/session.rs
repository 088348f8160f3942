//! Session
//!
//! The auth gate decides what a protected view shows. Without a session it
//! asks for exactly one redirect to the identity provider and then waits.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identity claims of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Subject identifier, sent as the user id header.
    pub sub: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Login name.
    #[serde(default)]
    pub preferred_username: Option<String>,
}

/// An authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
    user: UserInfo,
}

impl Session {
    /// Create a session from an access token and the user it belongs to.
    pub fn new(access_token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }

    /// Raw access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Subject identifier of the user.
    pub fn user_id(&self) -> &str {
        &self.user.sub
    }

    /// Identity claims.
    pub fn user(&self) -> &UserInfo {
        &self.user
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Where the gate stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The session has not been looked up yet.
    #[default]
    Uninitialized,

    /// A session exists.
    Authenticated(Session),

    /// No session exists.
    Unauthenticated {
        /// Whether the login redirect has been issued.
        redirected: bool,
    },
}

/// What a protected view should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision<'a> {
    /// Show a placeholder.
    Loading,

    /// Show the view for this session.
    Render(&'a Session),

    /// Send the user to the identity provider's login.
    Redirect,
}

/// Guards views that need a session.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    state: AuthState,
}

impl AuthGate {
    /// A gate whose session has not been looked up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Current session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Record the result of the session lookup.
    pub fn resolve(&mut self, session: Option<Session>) {
        self.state = match session {
            Some(session) => {
                debug!(user_id = session.user_id(), "session resolved");
                AuthState::Authenticated(session)
            }
            None => {
                debug!("no session");
                AuthState::Unauthenticated { redirected: false }
            }
        };
    }

    /// Drop the session.
    pub fn sign_out(&mut self) {
        self.state = AuthState::Unauthenticated { redirected: false };
    }

    /// Decide what a protected view shows. The redirect is issued once.
    pub fn protected_view(&mut self) -> GateDecision<'_> {
        match &mut self.state {
            AuthState::Uninitialized => GateDecision::Loading,
            AuthState::Authenticated(session) => GateDecision::Render(session),
            AuthState::Unauthenticated { redirected } if !*redirected => {
                *redirected = true;
                GateDecision::Redirect
            }
            AuthState::Unauthenticated { .. } => GateDecision::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            "secret-token",
            UserInfo {
                sub: "user-1".to_string(),
                ..UserInfo::default()
            },
        )
    }

    #[test]
    fn uninitialized_gate_shows_loading() {
        let mut gate = AuthGate::new();

        assert_eq!(gate.protected_view(), GateDecision::Loading);
    }

    #[test]
    fn authenticated_gate_renders_view() {
        let mut gate = AuthGate::new();
        gate.resolve(Some(session()));

        assert_eq!(gate.protected_view(), GateDecision::Render(&session()));
    }

    #[test]
    fn unauthenticated_gate_redirects_once() {
        let mut gate = AuthGate::new();
        gate.resolve(None);

        assert_eq!(gate.protected_view(), GateDecision::Redirect);
        assert_eq!(gate.protected_view(), GateDecision::Loading);
        assert_eq!(gate.protected_view(), GateDecision::Loading);
    }

    #[test]
    fn sign_out_rearms_redirect() {
        let mut gate = AuthGate::new();
        gate.resolve(Some(session()));

        gate.sign_out();

        assert_eq!(gate.session(), None);
        assert_eq!(gate.protected_view(), GateDecision::Redirect);
    }

    #[test]
    fn debug_output_redacts_token() {
        let output = format!("{:?}", session());

        assert!(!output.contains("secret-token"), "token leaked: {output}");
        assert!(output.contains("user-1"), "user missing: {output}");
    }

    #[test]
    fn session_builds_bearer_header() {
        assert_eq!(session().bearer(), "Bearer secret-token");
    }
}
