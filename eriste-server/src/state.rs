//! Shared per-request application state.

use eriste_core::cart_manager::{CartManager, PgCartManager};
use eriste_core::config::SharedConfig;
use sqlx::PgPool;
use std::sync::Arc;

/// Everything a request handler can reach.
///
/// Cloned per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Runtime configuration, reloadable via SIGHUP.
    pub config: SharedConfig,
    /// Cart storage, behind the manager seam.
    pub cart_manager: Arc<dyn CartManager>,
}

impl AppState {
    pub fn new(db: PgPool, config: SharedConfig) -> Self {
        let cart_manager = Arc::new(PgCartManager::new(db.clone()));
        Self {
            db,
            config,
            cart_manager,
        }
    }
}
