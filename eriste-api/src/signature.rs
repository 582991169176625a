//! Signature scheme for payment-gateway callbacks.
//!
//! The gateway signs every callback it delivers with HMAC-SHA256 over the
//! concatenation of the base64 payload and the merchant account id:
//!
//! ```text
//! hash = hex( HMAC-SHA256(signing_key, res + account_id) )
//! ```
//!
//! The `hash` form field carries the digest as hex.  Verification decodes
//! the hex and hands the raw bytes to `ring`, which compares digests in
//! constant time.

/// Form field carrying the base64-encoded JSON payload.
pub const RES_FIELD: &str = "res";

/// Form field carrying the hex HMAC-SHA256 digest.
pub const HASH_FIELD: &str = "hash";

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The wire digest is not valid hex, so it cannot match any HMAC output.
    #[error("signature is not valid hex")]
    InvalidHex,
    /// The digest does not match the payload.
    #[error("signature mismatch")]
    Mismatch,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::Mismatch
    }
}

// ---------------------------------------------------------------------------
// Signing / verification
// ---------------------------------------------------------------------------

/// Assemble the exact byte sequence the gateway signs: `res` immediately
/// followed by the merchant account id, no separator.
pub fn signature_message(res: &str, account_id: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(res.len() + account_id.len());
    message.extend_from_slice(res.as_bytes());
    message.extend_from_slice(account_id.as_bytes());
    message
}

/// Compute the callback digest for a payload, rendered as lowercase hex.
pub fn sign_callback(res: &str, account_id: &str, key: &[u8]) -> String {
    let digest = ring::hmac::sign(
        &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
        &signature_message(res, account_id),
    );
    hex::encode(digest.as_ref())
}

/// Verify a wire digest against the payload.
///
/// Hex digits are accepted in either case; the comparison happens on the
/// decoded bytes inside `ring::hmac::verify`.
pub fn verify_callback(
    res: &str,
    account_id: &str,
    key: &[u8],
    hash: &str,
) -> Result<(), SignatureError> {
    let provided = hex::decode(hash).map_err(|_| SignatureError::InvalidHex)?;
    ring::hmac::verify(
        &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
        &signature_message(res, account_id),
        &provided,
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"eriste-signing-key";

    #[test]
    fn sign_produces_lowercase_hex_sha256() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!hash.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn verify_accepts_own_signature() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY);
        assert!(verify_callback("cGF5bG9hZA==", "shopuser", KEY, &hash).is_ok());
    }

    #[test]
    fn verify_accepts_uppercase_hex() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY).to_uppercase();
        assert!(verify_callback("cGF5bG9hZA==", "shopuser", KEY, &hash).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY);
        let err = verify_callback("cGF5bG9hZB==", "shopuser", KEY, &hash).unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn verify_rejects_wrong_account() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY);
        let err = verify_callback("cGF5bG9hZA==", "otheruser", KEY, &hash).unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY);
        let err = verify_callback("cGF5bG9hZA==", "shopuser", b"other-key", &hash).unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn verify_rejects_garbage_hex() {
        let err = verify_callback("cGF5bG9hZA==", "shopuser", KEY, "not-hex").unwrap_err();
        assert!(matches!(err, SignatureError::InvalidHex));
    }

    #[test]
    fn verify_rejects_truncated_digest() {
        let hash = sign_callback("cGF5bG9hZA==", "shopuser", KEY);
        let err = verify_callback("cGF5bG9hZA==", "shopuser", KEY, &hash[..32]).unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }
}
