//! Runtime configuration shared across the workspace.
//!
//! The server crate owns loading and validation; everything here is the
//! already-validated form the rest of the code reads at runtime.

mod admin;
mod gateway;
mod server;
mod store;

pub use admin::AdminConfig;
pub use gateway::GatewayConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Live config handle: one lock per section.
///
/// A SIGHUP reload writes one section at a time, so a reader never blocks
/// on sections it does not touch.
#[derive(Clone)]
pub struct SharedConfig {
    /// Listener settings.
    pub server: Arc<RwLock<ServerConfig>>,
    /// Admin secret hash.
    pub admin: Arc<RwLock<AdminConfig>>,
    /// Store name, currency, and order expiry knobs.
    pub store: Arc<RwLock<StoreConfig>>,
    /// Payment gateway credentials; `None` until both secrets are deployed.
    pub gateway: Arc<RwLock<Option<GatewayConfig>>>,
}

impl SharedConfig {
    pub fn new(
        server: ServerConfig,
        admin: AdminConfig,
        store: StoreConfig,
        gateway: Option<GatewayConfig>,
    ) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            admin: Arc::new(RwLock::new(admin)),
            store: Arc::new(RwLock::new(store)),
            gateway: Arc::new(RwLock::new(gateway)),
        }
    }

    /// Read lock on the listener settings.
    pub async fn server(&self) -> tokio::sync::RwLockReadGuard<'_, ServerConfig> {
        self.server.read().await
    }

    /// Read lock on the admin secret.
    pub async fn admin(&self) -> tokio::sync::RwLockReadGuard<'_, AdminConfig> {
        self.admin.read().await
    }

    /// Read lock on the store settings.
    pub async fn store(&self) -> tokio::sync::RwLockReadGuard<'_, StoreConfig> {
        self.store.read().await
    }

    /// Read lock on the gateway credentials.
    pub async fn gateway(&self) -> tokio::sync::RwLockReadGuard<'_, Option<GatewayConfig>> {
        self.gateway.read().await
    }

    pub async fn update_server(&self, config: ServerConfig) {
        *self.server.write().await = config;
    }

    pub async fn update_admin(&self, config: AdminConfig) {
        *self.admin.write().await = config;
    }

    pub async fn update_store(&self, config: StoreConfig) {
        *self.store.write().await = config;
    }

    pub async fn update_gateway(&self, config: Option<GatewayConfig>) {
        *self.gateway.write().await = config;
    }

    /// Replace every section, one lock at a time.
    pub async fn update_all(
        &self,
        server: ServerConfig,
        admin: AdminConfig,
        store: StoreConfig,
        gateway: Option<GatewayConfig>,
    ) {
        self.update_server(server).await;
        self.update_admin(admin).await;
        self.update_store(store).await;
        self.update_gateway(gateway).await;
    }
}
