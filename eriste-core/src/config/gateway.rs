//! Payment gateway configuration.

/// Payment gateway credentials for callback verification.
///
/// Both values come from the environment at startup; a deployment without
/// them runs fine but answers every callback with a configuration error.
#[derive(Clone)]
pub struct GatewayConfig {
    /// The merchant account id the gateway appends to signed payloads.
    pub account_id: String,
    /// Shared HMAC key.
    secret: Box<[u8]>,
}

impl GatewayConfig {
    pub fn new(account_id: String, secret: impl Into<Box<[u8]>>) -> Self {
        Self {
            account_id,
            secret: secret.into(),
        }
    }

    /// The raw key bytes, for signature verification.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("account_id", &self.account_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
