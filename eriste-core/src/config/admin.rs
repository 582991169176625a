//! Admin panel secret.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// The admin secret, held as an argon2 PHC string.
///
/// Only the hash is kept in memory; plaintext supplied by a request is
/// checked against it and dropped.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    secret_hash: String,
}

impl AdminConfig {
    pub fn new(secret_hash: String) -> Self {
        Self { secret_hash }
    }

    /// The stored PHC string, for writing back to the config file.
    pub fn phc_string(&self) -> &str {
        &self.secret_hash
    }

    /// Check a client-supplied secret against the stored hash.
    ///
    /// A stored hash that does not parse as a PHC string never verifies.
    pub fn verify_secret(&self, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.secret_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::{
        Argon2, PasswordHasher,
        password_hash::{SaltString, rand_core::OsRng},
    };

    fn hashed(secret: &str) -> AdminConfig {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .unwrap()
            .to_string();
        AdminConfig::new(hash)
    }

    #[test]
    fn correct_secret_verifies() {
        let config = hashed("yonetici-sifresi");
        assert!(config.verify_secret("yonetici-sifresi"));
        assert!(!config.verify_secret("yanlis-sifre"));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        let config = AdminConfig::new("not-a-phc-string".to_string());
        assert!(!config.verify_secret("anything"));
    }
}
