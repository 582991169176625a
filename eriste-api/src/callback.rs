//! Payment-gateway callback protocol.
//!
//! After a checkout completes on the gateway's hosted page, the gateway
//! notifies the storefront with a form-encoded POST carrying two fields:
//!
//! ```text
//! res  = base64( json_payload )
//! hash = hex( HMAC-SHA256(signing_key, res + account_id) )
//! ```
//!
//! The payload is a JSON object whose `orderid` member names the order the
//! notification settles.  Nothing in the payload is trusted until the
//! signature over the still-encoded `res` has been verified, so decoding
//! always happens after [`verify_callback`](crate::signature::verify_callback)
//! has passed.

use serde::Serialize;
use serde_json::Value;

use crate::signature::{self, HASH_FIELD, RES_FIELD, SignatureError};

/// Errors produced while verifying and decoding a callback.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    /// A required form field is missing or empty.
    #[error("missing `{0}` parameter")]
    MissingParameter(&'static str),
    /// The digest does not match, or is not decodable hex.
    #[error("signature verification failed")]
    InvalidSignature,
    /// `res` is not valid base64.
    #[error("payload is not valid base64")]
    InvalidBase64,
    /// The decoded payload is not valid UTF-8.
    #[error("payload is not valid utf-8")]
    InvalidUtf8,
    /// The decoded payload is not valid JSON.
    #[error("payload is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload carries no usable `orderid` member.
    #[error("payload carries no usable orderid")]
    MissingOrderId,
}

impl From<SignatureError> for CallbackError {
    fn from(_: SignatureError) -> Self {
        Self::InvalidSignature
    }
}

// ---------------------------------------------------------------------------
// CallbackRequest — the raw wire form
// ---------------------------------------------------------------------------

/// A callback exactly as it arrived: still-encoded payload plus digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRequest {
    pub res: String,
    pub hash: String,
}

impl CallbackRequest {
    /// Assemble a request from optional form fields, rejecting absent or
    /// empty values.
    pub fn from_fields(
        res: Option<String>,
        hash: Option<String>,
    ) -> Result<Self, CallbackError> {
        let res = res
            .filter(|v| !v.is_empty())
            .ok_or(CallbackError::MissingParameter(RES_FIELD))?;
        let hash = hash
            .filter(|v| !v.is_empty())
            .ok_or(CallbackError::MissingParameter(HASH_FIELD))?;
        Ok(Self { res, hash })
    }

    /// Verify the digest, then decode the payload, consuming `self` and
    /// returning the authenticated notification.
    ///
    /// The signature is checked over the base64 text before any decoding,
    /// so a forged request never reaches the JSON parser.
    pub fn verify_and_decode(
        self,
        account_id: &str,
        key: &[u8],
    ) -> Result<PaymentNotification, CallbackError> {
        signature::verify_callback(&self.res, account_id, key, &self.hash)?;
        let raw = fast32::base64::RFC4648
            .decode_str(&self.res)
            .map_err(|_| CallbackError::InvalidBase64)?;
        let decoded_json = String::from_utf8(raw).map_err(|_| CallbackError::InvalidUtf8)?;
        let payload: Value = serde_json::from_str(&decoded_json)?;
        let order_id = coerce_order_id(&payload)?;
        Ok(PaymentNotification {
            order_id,
            decoded_json,
            payload,
        })
    }
}

/// Extract `orderid` from a decoded payload.
///
/// Gateways are inconsistent about the member's JSON type, so both strings
/// and numbers are accepted; anything else is unusable.
fn coerce_order_id(payload: &Value) -> Result<String, CallbackError> {
    match payload.get("orderid") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(CallbackError::MissingOrderId),
    }
}

// ---------------------------------------------------------------------------
// PaymentNotification — the authenticated payload
// ---------------------------------------------------------------------------

/// A callback that passed signature verification and decoded cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotification {
    /// The order reference the gateway settles, coerced to a string.
    pub order_id: String,
    /// The payload as the decoded JSON text, byte-for-byte.
    pub decoded_json: String,
    /// The parsed payload, kept flexible: gateways add members freely.
    pub payload: Value,
}

impl PaymentNotification {
    /// The payload's `status` member, when it is a string.
    pub fn status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }
}

/// Acknowledgement body returned to the gateway once a callback settled.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackAck {
    pub message: &'static str,
    #[serde(rename = "decodedJson")]
    pub decoded_json: String,
    pub orderid: String,
    pub data: Value,
}

impl CallbackAck {
    pub fn ok(notification: PaymentNotification) -> Self {
        Self {
            message: "ok",
            decoded_json: notification.decoded_json,
            orderid: notification.order_id,
            data: notification.payload,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::signature::sign_callback;

    const ACCOUNT: &str = "shopuser";
    const KEY: &[u8] = b"gizli-imza-anahtari";

    fn encode(json: &str) -> String {
        fast32::base64::RFC4648.encode(json.as_bytes())
    }

    fn signed(json: &str) -> CallbackRequest {
        let res = encode(json);
        let hash = sign_callback(&res, ACCOUNT, KEY);
        CallbackRequest { res, hash }
    }

    fn decode(json: &str) -> Result<PaymentNotification, CallbackError> {
        signed(json).verify_and_decode(ACCOUNT, KEY)
    }

    #[test]
    fn valid_callback_decodes_and_extracts_order() {
        let json = r#"{"orderid":"1001","status":"paid"}"#;
        let notification = decode(json).unwrap();
        assert_eq!(notification.order_id, "1001");
        assert_eq!(notification.decoded_json, json);
        assert_eq!(notification.status(), Some("paid"));
        assert_eq!(notification.payload["orderid"], "1001");
    }

    #[test]
    fn missing_res_is_rejected() {
        let err = CallbackRequest::from_fields(None, Some("aa".into())).unwrap_err();
        assert!(matches!(err, CallbackError::MissingParameter("res")));
    }

    #[test]
    fn empty_hash_counts_as_missing() {
        let err = CallbackRequest::from_fields(Some("aa".into()), Some(String::new())).unwrap_err();
        assert!(matches!(err, CallbackError::MissingParameter("hash")));
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let mut request = signed(r#"{"orderid":"1001","status":"paid"}"#);
        request.res = encode(r#"{"orderid":"9999","status":"paid"}"#);
        let err = request.verify_and_decode(ACCOUNT, KEY).unwrap_err();
        assert!(matches!(err, CallbackError::InvalidSignature));
    }

    #[test]
    fn signature_over_wrong_account_is_rejected() {
        let res = encode(r#"{"orderid":"1001"}"#);
        let hash = sign_callback(&res, "otheruser", KEY);
        let err = CallbackRequest { res, hash }
            .verify_and_decode(ACCOUNT, KEY)
            .unwrap_err();
        assert!(matches!(err, CallbackError::InvalidSignature));
    }

    #[test]
    fn garbage_hex_hash_is_an_invalid_signature() {
        let res = encode(r#"{"orderid":"1001"}"#);
        let request = CallbackRequest {
            res,
            hash: "zz-not-hex".into(),
        };
        let err = request.verify_and_decode(ACCOUNT, KEY).unwrap_err();
        assert!(matches!(err, CallbackError::InvalidSignature));
    }

    #[test]
    fn signature_is_checked_before_decoding() {
        // Unverifiable garbage never reaches the base64 decoder.
        let request = CallbackRequest {
            res: "!!not base64!!".into(),
            hash: "00".repeat(32),
        };
        let err = request.verify_and_decode(ACCOUNT, KEY).unwrap_err();
        assert!(matches!(err, CallbackError::InvalidSignature));

        // The same garbage with a correct digest fails at the decode step.
        let res = String::from("!!not base64!!");
        let hash = sign_callback(&res, ACCOUNT, KEY);
        let err = CallbackRequest { res, hash }
            .verify_and_decode(ACCOUNT, KEY)
            .unwrap_err();
        assert!(matches!(err, CallbackError::InvalidBase64));
    }

    #[test]
    fn signed_non_json_payload_is_malformed() {
        let err = decode("definitely not json").unwrap_err();
        assert!(matches!(err, CallbackError::Json(_)));
    }

    #[test]
    fn signed_non_utf8_payload_is_malformed() {
        let res = fast32::base64::RFC4648.encode(&[0xff, 0xfe, 0x90]);
        let hash = sign_callback(&res, ACCOUNT, KEY);
        let err = CallbackRequest { res, hash }
            .verify_and_decode(ACCOUNT, KEY)
            .unwrap_err();
        assert!(matches!(err, CallbackError::InvalidUtf8));
    }

    #[test]
    fn numeric_orderid_is_coerced_to_text() {
        let notification = decode(r#"{"orderid":1001,"status":"paid"}"#).unwrap();
        assert_eq!(notification.order_id, "1001");
    }

    #[test]
    fn unusable_orderid_is_rejected() {
        for json in [
            r#"{"status":"paid"}"#,
            r#"{"orderid":null}"#,
            r#"{"orderid":""}"#,
            r#"{"orderid":true}"#,
            r#"{"orderid":{"nested":1}}"#,
        ] {
            let err = decode(json).unwrap_err();
            assert!(matches!(err, CallbackError::MissingOrderId), "{json}");
        }
    }

    #[test]
    fn unicode_payload_survives_decoding() {
        let json = r#"{"orderid":"1002","item":"erişte ürünü"}"#;
        let notification = decode(json).unwrap();
        assert_eq!(notification.decoded_json, json);
        assert_eq!(notification.payload["item"], "erişte ürünü");
    }

    #[test]
    fn ack_serializes_with_wire_field_names() {
        let notification = decode(r#"{"orderid":"1001","status":"paid"}"#).unwrap();
        let ack = serde_json::to_value(CallbackAck::ok(notification)).unwrap();
        assert_eq!(ack["message"], "ok");
        assert_eq!(ack["orderid"], "1001");
        assert_eq!(ack["decodedJson"], r#"{"orderid":"1001","status":"paid"}"#);
        assert_eq!(ack["data"]["status"], "paid");
    }
}
