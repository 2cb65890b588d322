//! Payment callback signature verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a processor callback signature.
///
/// The expected signature is HMAC-SHA256 over `"<order_id>|<payment_id>"`
/// keyed with the merchant's key secret, hex-encoded. Comparison happens in
/// constant time via [`Mac::verify_slice`]; a malformed hex signature simply
/// fails verification.
pub fn verify_signature(
    order_id: &str,
    payment_id: &str,
    signature_hex: &str,
    key_secret: &str,
) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    // Key length is unrestricted for HMAC; new_from_slice cannot fail.
    let Ok(mut mac) = HmacSha256::new_from_slice(key_secret.as_bytes()) else {
        return false;
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-key-secret";

    fn sign(order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_valid_signature() {
        let sig = sign("order_1", "pay_1");
        assert!(verify_signature("order_1", "pay_1", &sig, SECRET));
    }

    #[test]
    fn rejects_signature_for_other_order() {
        let sig = sign("order_1", "pay_1");
        assert!(!verify_signature("order_2", "pay_1", &sig, SECRET));
    }

    #[test]
    fn rejects_wrong_secret() {
        let sig = sign("order_1", "pay_1");
        assert!(!verify_signature("order_1", "pay_1", &sig, "other-secret"));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(!verify_signature("order_1", "pay_1", "not-hex!", SECRET));
    }

    #[test]
    fn rejects_truncated_signature() {
        let sig = sign("order_1", "pay_1");
        assert!(!verify_signature("order_1", "pay_1", &sig[..32], SECRET));
    }
}
