//! OrderExpiryWatcher processor.
//!
//! A pending order holds its reference (and nothing else: stock is only
//! committed at checkout) while it waits for the gateway callback.  This
//! watcher sweeps the orders table on an interval and flips stale pending
//! orders to `expired`.  TTL and interval are re-read from the shared
//! config on every pass, so a SIGHUP reload takes effect without a restart.

use std::sync::Arc;

use kanau::processor::Processor;
use sqlx::PgPool;
use tokio::sync::{RwLock, watch};
use tracing::{error, info};

use crate::config::StoreConfig;
use crate::entities::orders::ExpireStaleOrders;
use crate::framework::DatabaseProcessor;

/// OrderExpiryWatcher expires pending orders past their payment window.
pub struct OrderExpiryWatcher {
    pool: PgPool,
    store: Arc<RwLock<StoreConfig>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl OrderExpiryWatcher {
    /// Create a new OrderExpiryWatcher.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `store` - Shared storefront configuration (TTL and sweep interval)
    /// * `shutdown_rx` - Receiver for shutdown signal
    pub fn new(
        pool: PgPool,
        store: Arc<RwLock<StoreConfig>>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pool,
            store,
            shutdown_rx,
        }
    }

    /// Run the OrderExpiryWatcher.
    pub async fn run(mut self) {
        info!("OrderExpiryWatcher started");

        loop {
            let sweep_secs = { self.store.read().await.expiry_sweep_secs };

            tokio::select! {
                biased;

                // Check for shutdown
                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("OrderExpiryWatcher received shutdown signal");
                        break;
                    }
                }

                _ = tokio::time::sleep(std::time::Duration::from_secs(sweep_secs)) => {
                    if let Err(e) = self.sweep().await {
                        error!(error = %e, "Failed to expire stale orders");
                    }
                }
            }
        }

        info!("OrderExpiryWatcher shutdown complete");
    }

    /// One expiry pass.
    async fn sweep(&self) -> Result<(), sqlx::Error> {
        let ttl_hours = { self.store.read().await.pending_order_ttl_hours };
        let cutoff = expiry_cutoff(time::OffsetDateTime::now_utc(), ttl_hours);

        let processor = DatabaseProcessor {
            pool: self.pool.clone(),
        };
        let expired = processor.process(ExpireStaleOrders { cutoff }).await?;

        if expired > 0 {
            info!(expired, ttl_hours, "Expired stale pending orders");
        }
        Ok(())
    }
}

/// The cutoff before which a pending order counts as stale.
pub fn expiry_cutoff(now: time::OffsetDateTime, ttl_hours: i64) -> time::PrimitiveDateTime {
    let cutoff = now - time::Duration::hours(ttl_hours);
    time::PrimitiveDateTime::new(cutoff.date(), cutoff.time())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_exactly_ttl_hours_back() {
        let now = time::OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let cutoff = expiry_cutoff(now, 48);
        assert_eq!(
            cutoff.assume_utc().unix_timestamp(),
            1_700_000_000 - 48 * 3600
        );
    }

    #[test]
    fn zero_ttl_cutoff_is_now() {
        let now = time::OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let cutoff = expiry_cutoff(now, 0);
        assert_eq!(cutoff.assume_utc().unix_timestamp(), 1_700_000_000);
    }
}
