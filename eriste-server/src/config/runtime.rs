//! Convenience re-exports of the runtime config types.
//!
//! The types themselves live in `eriste-core::config`.

pub use eriste_core::config::{AdminConfig, GatewayConfig, ServerConfig, SharedConfig, StoreConfig};
