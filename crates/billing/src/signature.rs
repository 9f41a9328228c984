//! Paystack webhook signature verification
//!
//! Paystack signs the raw request body with HMAC-SHA512 keyed by the
//! account's secret key and sends the lowercase hex digest in the
//! `x-paystack-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::error::{BillingError, BillingResult};

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the body signature
pub const PAYSTACK_SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Signs and verifies webhook payloads with the shared secret
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Lowercase hex HMAC-SHA512 of the exact payload bytes
    pub fn sign(&self, payload: &[u8]) -> BillingResult<String> {
        let mut mac = HmacSha512::new_from_slice(self.secret.as_bytes()).map_err(|_| {
            tracing::error!("Invalid webhook secret key");
            BillingError::WebhookSignatureInvalid
        })?;
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check the supplied header value against the computed digest
    ///
    /// The comparison is exact (no case folding or trimming) and runs in
    /// constant time. A missing header never verifies.
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> BillingResult<()> {
        let signature = signature.ok_or(BillingError::WebhookSignatureInvalid)?;
        let computed = self.sign(payload)?;

        if bool::from(computed.as_bytes().ct_eq(signature.as_bytes())) {
            Ok(())
        } else {
            Err(BillingError::WebhookSignatureInvalid)
        }
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "sk_test_paymark";
    const BODY: &[u8] = br#"{"event":"charge.success","data":{"customer":{"email":"ada@example.com"}}}"#;

    #[test]
    fn test_known_digest() {
        // RFC 4231 test case 2
        let verifier = WebhookVerifier::new("Jefe");
        assert_eq!(
            verifier.sign(b"what do ya want for nothing?").unwrap(),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_signature_round_trip_verifies() {
        let verifier = WebhookVerifier::new(SECRET);
        let signature = verifier.sign(BODY).unwrap();

        assert_eq!(signature.len(), 128);
        assert!(verifier.verify(BODY, Some(&signature)).is_ok());
    }

    #[test]
    fn test_altered_byte_rejected() {
        let verifier = WebhookVerifier::new(SECRET);
        let signature = verifier.sign(BODY).unwrap();

        let mut tampered = BODY.to_vec();
        tampered[10] ^= 0x01;

        assert!(matches!(
            verifier.verify(&tampered, Some(&signature)),
            Err(BillingError::WebhookSignatureInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signature = WebhookVerifier::new("sk_test_other").sign(BODY).unwrap();
        let verifier = WebhookVerifier::new(SECRET);

        assert!(verifier.verify(BODY, Some(&signature)).is_err());
    }

    #[test]
    fn test_missing_or_empty_header_rejected() {
        let verifier = WebhookVerifier::new(SECRET);
        assert!(verifier.verify(BODY, None).is_err());
        assert!(verifier.verify(BODY, Some("")).is_err());
    }

    #[test]
    fn test_uppercase_hex_rejected() {
        let verifier = WebhookVerifier::new(SECRET);
        let signature = verifier.sign(BODY).unwrap().to_uppercase();

        assert!(verifier.verify(BODY, Some(&signature)).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", WebhookVerifier::new(SECRET));
        assert!(!rendered.contains(SECRET));
    }
}
