//! Callback delivery client (gateway → storefront direction).
//!
//! Production callbacks come from the payment gateway itself; this client
//! exists for staging environments and integration drills, where a trusted
//! backend replays payment notifications against a storefront deployment.

use reqwest::Client;
use serde_json::Value;

use super::ClientError;
use crate::signature::{HASH_FIELD, RES_FIELD, sign_callback};

/// Typed HTTP client that signs and delivers payment callbacks.
///
/// Every delivery posts the form the gateway would send:
/// `res` (base64 JSON payload) and `hash`
/// (`hex(HMAC-SHA256(signing_key, res + account_id))`).
#[derive(Debug, Clone)]
pub struct CallbackSender {
    http: Client,
    endpoint: String,
    account_id: String,
    signing_key: Vec<u8>,
}

impl CallbackSender {
    /// Create a new `CallbackSender`.
    ///
    /// * `endpoint` – full webhook URL (e.g. `https://shop.example.com/api/payment/webhook`).
    /// * `account_id` – the merchant account id the storefront verifies against.
    /// * `signing_key` – the shared HMAC secret.
    pub fn new(
        endpoint: impl Into<String>,
        account_id: impl Into<String>,
        signing_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            account_id: account_id.into(),
            signing_key: signing_key.into(),
        }
    }

    /// Swap in a preconfigured `reqwest::Client`, for timeouts or a proxy.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Sign `payload` and deliver it to the storefront webhook.
    ///
    /// Returns the acknowledgement body on 2xx.
    pub async fn deliver(&self, payload: &Value) -> Result<Value, ClientError> {
        let json = serde_json::to_string(payload).map_err(ClientError::Json)?;
        let res = fast32::base64::RFC4648.encode(json.as_bytes());
        let hash = sign_callback(&res, &self.account_id, &self.signing_key);

        let resp = self
            .http
            .post(&self.endpoint)
            .form(&[(RES_FIELD, res.as_str()), (HASH_FIELD, hash.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::Json)
    }
}
