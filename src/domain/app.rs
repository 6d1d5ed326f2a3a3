//! Session-scoped application façade.
//!
//! Owns the three services for one client session and wires them together:
//! access to catalog and orders is gated on the session state, the initial
//! remote loads run when a session is established, and caches are reloaded
//! wholesale whenever the active identity changes.

use std::sync::Arc;

use log::info;

use crate::domain::errors::AppError;
use crate::domain::menu_service::MenuService;
use crate::domain::models::session::{Identity, SessionState};
use crate::domain::order_service::OrderService;
use crate::domain::session_service::SessionGate;
use crate::storage::traits::{DocumentStore, IdentityProvider};

pub struct OrderingApp {
    session: SessionGate,
    catalog: MenuService,
    orders: OrderService,
}

impl OrderingApp {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            session: SessionGate::new(provider),
            catalog: MenuService::new(Arc::clone(&store)),
            orders: OrderService::new(store),
        }
    }

    /// Resolves the initial session state and, when a session is already
    /// established, performs the initial remote loads.
    pub async fn initialize(&mut self) -> Result<(), AppError> {
        if self.session.initialize().await.is_authenticated() {
            self.reload().await?;
        }
        Ok(())
    }

    pub async fn login(&mut self, email: &str, secret: &str) -> Result<Identity, AppError> {
        let identity = self.session.login(email, secret).await?;
        self.reload().await?;
        Ok(identity)
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<Identity, AppError> {
        let identity = self.session.sign_up(email, secret, display_name).await?;
        self.reload().await?;
        Ok(identity)
    }

    /// Signs out and discards all data cached for the previous identity.
    pub async fn logout(&mut self) {
        self.session.logout().await;
        self.catalog.clear();
        self.orders.clear();
    }

    async fn reload(&mut self) -> Result<(), AppError> {
        let items = self.catalog.load().await?;
        let orders = self.orders.load().await?;
        info!("Session data loaded: {} menu items, {} orders", items, orders);
        Ok(())
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    fn ensure_authenticated(&self) -> Result<(), AppError> {
        match self.session.state() {
            SessionState::Loading => Err(AppError::SessionLoading),
            SessionState::Unauthenticated => Err(AppError::AccessDenied),
            SessionState::Authenticated(_) => Ok(()),
        }
    }

    pub fn catalog(&self) -> Result<&MenuService, AppError> {
        self.ensure_authenticated()?;
        Ok(&self.catalog)
    }

    pub fn catalog_mut(&mut self) -> Result<&mut MenuService, AppError> {
        self.ensure_authenticated()?;
        Ok(&mut self.catalog)
    }

    pub fn orders(&self) -> Result<&OrderService, AppError> {
        self.ensure_authenticated()?;
        Ok(&self.orders)
    }

    pub fn orders_mut(&mut self) -> Result<&mut OrderService, AppError> {
        self.ensure_authenticated()?;
        Ok(&mut self.orders)
    }
}
