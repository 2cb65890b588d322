//! Encode service: base64 + encrypted representations of a payload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::{EncodedPayload, EncryptedData};
use common::ServiceError;

use crate::crypto::{cipher, derive_key, Platform, SecretProvider};

/// Canonical string form of a payload plus its recorded data type.
///
/// Objects and arrays are JSON-serialised; strings are used literally (not
/// JSON-quoted); other primitives use their display form. The data type
/// decides whether decode re-parses the recovered string as JSON.
fn canonicalize(payload: &serde_json::Value) -> Result<(String, &'static str), ServiceError> {
    match payload {
        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
            let s = serde_json::to_string(payload)
                .map_err(|e| ServiceError::EncodingFailed(e.to_string()))?;
            Ok((s, "object"))
        }
        serde_json::Value::String(s) => Ok((s.clone(), "string")),
        serde_json::Value::Number(n) => Ok((n.to_string(), "number")),
        serde_json::Value::Bool(b) => Ok((b.to_string(), "boolean")),
        // JSON null has no primitive kind of its own on this wire contract.
        serde_json::Value::Null => Ok(("null".to_owned(), "object")),
    }
}

/// Produce the base64 and encrypted representations of `payload` for
/// `platform_name`.
///
/// A fresh random IV is generated per call, so identical payloads encrypt to
/// different ciphertext on every invocation.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidPlatform`] before any cipher work when the
/// platform is unrecognised, and [`ServiceError::EncodingFailed`] on any
/// serialisation or cipher failure.
pub fn encode(
    payload: &serde_json::Value,
    platform_name: &str,
    secrets: &dyn SecretProvider,
) -> Result<EncodedPayload, ServiceError> {
    let platform = Platform::parse(platform_name)?;
    let (canonical, data_type) = canonicalize(payload)?;

    let base64_encoded = STANDARD.encode(canonical.as_bytes());

    let key = derive_key(platform, secrets);
    let spec = platform.cipher_spec();
    let iv = cipher::random_iv(spec.iv_len);

    let ciphertext = cipher::encrypt(spec.algorithm, &key, &iv, canonical.as_bytes())
        .map_err(|e| ServiceError::EncodingFailed(e.to_string()))?;

    Ok(EncodedPayload {
        platform: platform.as_str().to_owned(),
        base64_encoded,
        encrypted: EncryptedData {
            algorithm: spec.algorithm.as_str().to_owned(),
            iv: hex::encode(&iv),
            content: hex::encode(&ciphertext.content),
            auth_tag: ciphertext.auth_tag.map(hex::encode),
        },
        original_data_type: data_type.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::platform::ALL_PLATFORMS;
    use serde_json::json;

    struct NoSecrets;

    impl SecretProvider for NoSecrets {
        fn secret(&self, _platform: Platform) -> Option<String> {
            None
        }
    }

    #[test]
    fn unknown_platform_rejected_before_cipher_work() {
        let err = encode(&json!({"a": 1}), "Unknown", &NoSecrets).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidPlatform(_)));
    }

    #[test]
    fn paytm_worked_example() {
        let out = encode(&json!({"course": "x"}), "Paytm", &NoSecrets).unwrap();
        assert_eq!(out.platform, "Paytm");
        assert_eq!(out.base64_encoded, STANDARD.encode(r#"{"course":"x"}"#));
        assert_eq!(out.encrypted.algorithm, "aes-256-cbc");
        assert_eq!(out.encrypted.iv.len(), 32, "16 IV bytes = 32 hex chars");
        assert!(out.encrypted.auth_tag.is_none());
        assert_eq!(out.original_data_type, "object");
    }

    #[test]
    fn stripe_carries_auth_tag() {
        let out = encode(&json!("hello"), "Stripe", &NoSecrets).unwrap();
        assert_eq!(out.encrypted.algorithm, "aes-256-gcm");
        assert_eq!(out.encrypted.iv.len(), 24, "12 IV bytes = 24 hex chars");
        assert_eq!(out.encrypted.auth_tag.as_ref().map(String::len), Some(32));
        assert_eq!(out.original_data_type, "string");
    }

    #[test]
    fn successive_calls_use_fresh_ivs() {
        for p in ALL_PLATFORMS {
            let a = encode(&json!({"k": "v"}), p.as_str(), &NoSecrets).unwrap();
            let b = encode(&json!({"k": "v"}), p.as_str(), &NoSecrets).unwrap();
            assert_ne!(a.encrypted.iv, b.encrypted.iv, "IV reuse on {p:?}");
            assert_ne!(
                a.encrypted.content, b.encrypted.content,
                "ciphertext reuse on {p:?}"
            );
            // The base64 representation is deterministic.
            assert_eq!(a.base64_encoded, b.base64_encoded);
        }
    }

    #[test]
    fn string_payload_encodes_literally() {
        let out = encode(&json!("plain text"), "Razorpay", &NoSecrets).unwrap();
        // Not JSON-quoted: the canonical string is the literal content.
        assert_eq!(out.base64_encoded, STANDARD.encode("plain text"));
        assert_eq!(out.original_data_type, "string");
    }

    #[test]
    fn primitive_payloads_record_their_kind() {
        let n = encode(&json!(42), "Razorpay", &NoSecrets).unwrap();
        assert_eq!(n.original_data_type, "number");
        assert_eq!(n.base64_encoded, STANDARD.encode("42"));

        let b = encode(&json!(true), "Razorpay", &NoSecrets).unwrap();
        assert_eq!(b.original_data_type, "boolean");
    }
}
