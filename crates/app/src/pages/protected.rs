//! Views that need a signed-in user.

use storefront::session::{AuthGate, GateDecision, Session};
use tracing::info;

use crate::{
    config::IdentityConfig,
    identity::{login_url, logout_url},
    pages::PageError,
};

/// What to show on entering a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<'a> {
    Loading,
    Render(&'a Session),
    /// Send the user to this login URL.
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct ProtectedView {
    gate: AuthGate,
    identity: IdentityConfig,
}

impl ProtectedView {
    pub fn new(identity: IdentityConfig) -> Self {
        Self {
            gate: AuthGate::new(),
            identity,
        }
    }

    /// Record the outcome of the session lookup.
    pub fn resolve(&mut self, session: Option<Session>) {
        self.gate.resolve(session);
    }

    pub fn session(&self) -> Option<&Session> {
        self.gate.session()
    }

    pub fn enter(&mut self) -> Result<Entry<'_>, PageError> {
        Ok(match self.gate.protected_view() {
            GateDecision::Loading => Entry::Loading,
            GateDecision::Render(session) => Entry::Render(session),
            GateDecision::Redirect => {
                info!("no session, redirecting to login");
                Entry::Redirect(login_url(&self.identity)?)
            }
        })
    }

    /// Drop the session and return the provider's logout URL.
    pub fn sign_out(&mut self) -> Result<String, PageError> {
        self.gate.sign_out();

        Ok(logout_url(&self.identity)?)
    }
}
