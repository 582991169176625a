//! Serde structs mirroring the on-disk `eriste-config.toml`.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// The whole config document. Only `[admin]` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:8080".
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// `[admin]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Plaintext when first written by an operator; replaced in the file by
    /// its argon2 hash on the next load.
    pub secret: String,
}

/// `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Human-readable store name.
    #[serde(default = "default_store_name")]
    pub name: String,
    /// ISO 4217 currency code orders are priced in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Hours a pending order may wait for payment before it expires.
    #[serde(default = "default_pending_order_ttl_hours")]
    pub pending_order_ttl_hours: i64,
    /// Seconds between expiry sweeps.
    #[serde(default = "default_expiry_sweep_secs")]
    pub expiry_sweep_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency: default_currency(),
            pending_order_ttl_hours: default_pending_order_ttl_hours(),
            expiry_sweep_secs: default_expiry_sweep_secs(),
        }
    }
}

fn default_store_name() -> String {
    "Erişte".to_string()
}

fn default_currency() -> String {
    "TRY".to_string()
}

fn default_pending_order_ttl_hours() -> i64 {
    24
}

fn default_expiry_sweep_secs() -> u64 {
    60
}

impl FileConfig {
    /// Whether the stored admin secret is already an argon2 PHC string.
    pub fn is_admin_secret_hashed(&self) -> bool {
        self.admin.secret.starts_with("$argon2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[admin]
secret = "test-secret"

[store]
name = "Test Noodle Shop"
currency = "USD"
pending_order_ttl_hours = 48
expiry_sweep_secs = 300
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.store.name, "Test Noodle Shop");
        assert_eq!(config.store.currency, "USD");
        assert_eq!(config.store.pending_order_ttl_hours, 48);
        assert_eq!(config.store.expiry_sweep_secs, 300);
        assert!(!config.is_admin_secret_hashed());
    }

    #[test]
    fn minimal_config_falls_back_to_defaults() {
        let toml_str = r#"
[admin]
secret = "test-secret"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.store.currency, "TRY");
        assert_eq!(config.store.pending_order_ttl_hours, 24);
        assert_eq!(config.store.expiry_sweep_secs, 60);
    }

    #[test]
    fn hashed_secret_is_recognised() {
        let config = FileConfig {
            server: ServerConfig::default(),
            admin: AdminConfig {
                secret: "$argon2id$v=19$m=19456,t=2,p=1$abc123".to_string(),
            },
            store: StoreConfig::default(),
        };
        assert!(config.is_admin_secret_hashed());
    }
}
