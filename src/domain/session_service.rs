//! Session gate.
//!
//! Tracks the authenticated identity for one client session and exposes
//! the login, sign-up, and logout transitions. Starts in `Loading` until
//! the identity provider reports its first known state.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::models::session::{Identity, SessionState};
use crate::storage::traits::{AuthError, IdentityProvider};

pub struct SessionGate {
    provider: Arc<dyn IdentityProvider>,
    state: SessionState,
}

impl SessionGate {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: SessionState::Loading,
        }
    }

    /// Resolves the initial `Loading` state from the provider's current
    /// session state.
    pub async fn initialize(&mut self) -> &SessionState {
        self.state = match self.provider.current_identity().await {
            Some(identity) => {
                info!("Session restored for {}", identity.email);
                SessionState::Authenticated(identity)
            }
            None => SessionState::Unauthenticated,
        };
        &self.state
    }

    pub async fn login(&mut self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        match self.provider.login(email, secret).await {
            Ok(identity) => {
                info!("Signed in as {}", identity.email);
                self.state = SessionState::Authenticated(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                warn!("Login failed for {}: {}", email, e);
                self.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError> {
        match self.provider.sign_up(email, secret, display_name).await {
            Ok(identity) => {
                info!("Created account for {}", identity.email);
                self.state = SessionState::Authenticated(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                warn!("Sign-up failed for {}: {}", email, e);
                self.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Unconditional transition to `Unauthenticated`.
    pub async fn logout(&mut self) {
        self.provider.logout().await;
        self.state = SessionState::Unauthenticated;
        info!("Signed out");
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }
}
