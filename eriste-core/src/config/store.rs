//! Storefront configuration.

use compact_str::CompactString;

/// Storefront configuration with runtime values.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Display name of the store.
    pub name: String,
    /// ISO 4217 currency code orders are priced in.
    pub currency: CompactString,
    /// Hours a pending order may wait for payment before it expires.
    pub pending_order_ttl_hours: i64,
    /// Seconds between expiry sweeps.
    pub expiry_sweep_secs: u64,
}
