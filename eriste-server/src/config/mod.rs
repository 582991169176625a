//! Configuration module for eriste-server.
//!
//! Merges the TOML file, CLI overrides, and environment variables into the
//! runtime config. The admin secret is hashed in place on first load;
//! gateway credentials and the database URL come only from the environment.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{
    AdminConfig, GatewayConfig, ServerConfig, SharedConfig, StoreConfig,
};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Environment variable carrying the gateway merchant account id.
pub const GATEWAY_ACCOUNT_ID_ENV: &str = "ERISTE_GATEWAY_ACCOUNT_ID";

/// Environment variable carrying the gateway HMAC signing key.
pub const GATEWAY_SIGNING_KEY_ENV: &str = "ERISTE_GATEWAY_SIGNING_KEY";

/// Failures while loading or rewriting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("password hashing error: {0}")]
    HashError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Every config section a successful load produces.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub store: StoreConfig,
    pub gateway: Option<GatewayConfig>,
}

impl LoadedConfig {
    /// Wrap each section in its runtime lock.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.server, self.admin, self.store, self.gateway)
    }
}

/// Turns a config file path plus CLI overrides into a [`LoadedConfig`].
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Run the full load pipeline: parse the TOML file, apply the CLI
    /// listen override, validate, hash a still-plaintext admin secret back
    /// into the file, and pick up gateway credentials from the environment.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        validate(&file_config)?;

        // First load with a plaintext secret: hash it and rewrite the file
        let secret_hash = if file_config.is_admin_secret_hashed() {
            file_config.admin.secret.clone()
        } else {
            let hash = self.hash_secret(&file_config.admin.secret)?;
            file_config.admin.secret = hash.clone();
            self.rewrite_config(&file_config)?;
            tracing::info!("Admin secret hashed; config file rewritten");
            hash
        };

        let gateway = load_gateway_from_env()?;

        Ok(build_loaded_config(file_config, secret_hash, gateway))
    }

    /// Rerun the load pipeline. The SIGHUP handler calls this.
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn hash_secret(&self, plaintext: &str) -> Result<String, ConfigError> {
        use argon2::{
            Argon2, PasswordHasher,
            password_hash::{SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ConfigError::HashError(e.to_string()))
    }

    fn rewrite_config(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(config)?;

        // Temp file plus rename, so a crash never leaves a half-written file
        let temp_path = self.config_path.with_extension("toml.tmp");
        std::fs::write(&temp_path, toml_string)?;
        std::fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.admin.secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "admin secret must not be empty".to_string(),
        ));
    }
    if config.store.currency.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "store currency must not be empty".to_string(),
        ));
    }
    if config.store.pending_order_ttl_hours < 1 {
        return Err(ConfigError::ValidationError(
            "pending order TTL must be at least one hour".to_string(),
        ));
    }
    if config.store.expiry_sweep_secs < 5 {
        return Err(ConfigError::ValidationError(
            "expiry sweep interval must be at least 5 seconds".to_string(),
        ));
    }
    Ok(())
}

fn build_loaded_config(
    file_config: FileConfig,
    secret_hash: String,
    gateway: Option<GatewayConfig>,
) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        admin: AdminConfig::new(secret_hash),
        store: StoreConfig {
            name: file_config.store.name,
            currency: file_config.store.currency.into(),
            pending_order_ttl_hours: file_config.store.pending_order_ttl_hours,
            expiry_sweep_secs: file_config.store.expiry_sweep_secs,
        },
        gateway,
    }
}

/// Read the gateway credentials from the environment.
///
/// Both variables absent is a legal unconfigured deployment (the callback
/// endpoint answers 500 until they are deployed); exactly one set is a
/// misconfiguration caught at startup.
pub fn load_gateway_from_env() -> Result<Option<GatewayConfig>, ConfigError> {
    let account_id = non_empty_env(GATEWAY_ACCOUNT_ID_ENV);
    let signing_key = non_empty_env(GATEWAY_SIGNING_KEY_ENV);
    gateway_from_values(account_id, signing_key)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn gateway_from_values(
    account_id: Option<String>,
    signing_key: Option<String>,
) -> Result<Option<GatewayConfig>, ConfigError> {
    match (account_id, signing_key) {
        (Some(account_id), Some(signing_key)) => Ok(Some(GatewayConfig::new(
            account_id,
            signing_key.into_bytes(),
        ))),
        (None, None) => Ok(None),
        _ => Err(ConfigError::ValidationError(format!(
            "{GATEWAY_ACCOUNT_ID_ENV} and {GATEWAY_SIGNING_KEY_ENV} must be set together"
        ))),
    }
}

/// The database URL comes from the environment, never the config file.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> FileConfig {
        toml::from_str(
            r#"
[admin]
secret = "plaintext-secret"
"#,
        )
        .unwrap()
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn blank_currency_is_rejected() {
        let mut config = valid_config();
        config.store.currency = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut config = valid_config();
        config.store.pending_order_ttl_hours = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn too_fast_sweep_is_rejected() {
        let mut config = valid_config();
        config.store.expiry_sweep_secs = 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn gateway_requires_both_values_or_neither() {
        assert!(gateway_from_values(None, None).unwrap().is_none());

        let gateway = gateway_from_values(Some("shopuser".into()), Some("key".into()))
            .unwrap()
            .unwrap();
        assert_eq!(gateway.account_id, "shopuser");
        assert_eq!(gateway.secret_bytes(), b"key");

        assert!(gateway_from_values(Some("shopuser".into()), None).is_err());
        assert!(gateway_from_values(None, Some("key".into())).is_err());
    }

    #[test]
    fn plaintext_admin_secret_is_hashed_and_file_rewritten() {
        let dir = std::env::temp_dir().join(format!("eriste-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("eriste-config.toml");
        std::fs::write(
            &path,
            r#"
[admin]
secret = "plaintext-secret"
"#,
        )
        .unwrap();

        let loader = ConfigLoader::new(&path, None);
        let loaded = loader.load().unwrap();

        assert!(loaded.admin.phc_string().starts_with("$argon2"));
        assert!(loaded.admin.verify_secret("plaintext-secret"));

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(!rewritten.contains("plaintext-secret"));
        assert!(rewritten.contains("$argon2"));

        // A second load keeps the stored hash untouched
        let reloaded = loader.load().unwrap();
        assert_eq!(reloaded.admin.phc_string(), loaded.admin.phc_string());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn listen_override_wins_over_file() {
        let dir = std::env::temp_dir().join(format!("eriste-listen-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("eriste-config.toml");
        std::fs::write(
            &path,
            r#"
[server]
listen = "127.0.0.1:3000"

[admin]
secret = "$argon2id$v=19$m=19456,t=2,p=1$abc123"
"#,
        )
        .unwrap();

        let loader = ConfigLoader::new(&path, Some("127.0.0.1:9999".parse().unwrap()));
        let loaded = loader.load().unwrap();
        assert_eq!(loaded.server.listen.port(), 9999);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
