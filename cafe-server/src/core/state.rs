use std::sync::Arc;

use crate::auth::{IdentityProvider, JwtService, LocalIdentityProvider};
use crate::core::{Config, Result};
use crate::db::repository::{MenuRepository, OrderRepository, UserRepository};
use crate::db::{self, KvStore};
use crate::services::OrderService;

/// Server state - shared handles for every request
///
/// Cloning is cheap: everything behind the config is an `Arc`.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | store | Arc<dyn KvStore> | Key-value store |
/// | identity | Arc<dyn IdentityProvider> | Signup, sign-in, token verification |
///
/// # Example
///
/// ```ignore
/// let state = ServerState::initialize(&config).await?;
/// let menu = state.menu_repo().find_all().await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn KvStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl ServerState {
    /// Manual construction (tests swap in their own collaborators)
    ///
    /// Usually [`initialize()`](Self::initialize) is used instead.
    pub fn new(
        config: Config,
        store: Arc<dyn KvStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            config,
            store,
            identity,
        }
    }

    /// Open the configured store and wire the local identity provider
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store = db::open_store(config)?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let identity = Arc::new(LocalIdentityProvider::new(store.clone(), jwt_service));

        tracing::debug!(backend = ?config.store_backend, "Server state initialized");
        Ok(Self::new(config.clone(), store, identity))
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn menu_repo(&self) -> MenuRepository {
        MenuRepository::new(self.store.clone())
    }

    pub fn order_repo(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(
            self.menu_repo(),
            self.order_repo(),
            self.config.strict_status_transitions,
        )
    }
}
