//! The closed set of payment platforms and their cipher policies.
//!
//! A platform label selects exactly one `(algorithm, iv length, secret env
//! var)` triple. The mapping is a static exhaustive match, so the encode and
//! decode paths cannot drift apart.

use common::ServiceError;

/// Supported payment platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Razorpay,
    Stripe,
    Paytm,
    Phonepay,
}

/// All platforms, in declaration order. Used by exhaustive tests.
pub const ALL_PLATFORMS: [Platform; 4] = [
    Platform::Razorpay,
    Platform::Stripe,
    Platform::Paytm,
    Platform::Phonepay,
];

/// Cipher algorithms used across the platform set.
///
/// The string forms are the canonical wire names carried in the `algorithm`
/// field of an encoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Aes256Ctr,
    Aes256Gcm,
    Aes256Cbc,
    Camellia256Cbc,
}

/// Cipher policy for a platform: which algorithm and how many IV bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSpec {
    /// Cipher algorithm applied to the canonical payload string.
    pub algorithm: Algorithm,
    /// Required IV length in bytes (12 for GCM, 16 otherwise).
    pub iv_len: usize,
}

impl Platform {
    /// Parse a caller-supplied platform label.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidPlatform`] for any string outside the
    /// four-member set. Callers must run this before any cipher work.
    pub fn parse(name: &str) -> Result<Self, ServiceError> {
        match name {
            "Razorpay" => Ok(Platform::Razorpay),
            "Stripe" => Ok(Platform::Stripe),
            "Paytm" => Ok(Platform::Paytm),
            "Phonepay" => Ok(Platform::Phonepay),
            other => Err(ServiceError::InvalidPlatform(other.to_owned())),
        }
    }

    /// Canonical label for this platform, as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Razorpay => "Razorpay",
            Platform::Stripe => "Stripe",
            Platform::Paytm => "Paytm",
            Platform::Phonepay => "Phonepay",
        }
    }

    /// The cipher policy for this platform.
    ///
    /// Must stay identical between the encode and decode paths or
    /// round-tripping breaks.
    pub fn cipher_spec(self) -> CipherSpec {
        match self {
            Platform::Razorpay => CipherSpec {
                algorithm: Algorithm::Aes256Ctr,
                iv_len: 16,
            },
            Platform::Stripe => CipherSpec {
                algorithm: Algorithm::Aes256Gcm,
                iv_len: 12,
            },
            Platform::Paytm => CipherSpec {
                algorithm: Algorithm::Aes256Cbc,
                iv_len: 16,
            },
            Platform::Phonepay => CipherSpec {
                algorithm: Algorithm::Camellia256Cbc,
                iv_len: 16,
            },
        }
    }

    /// Environment variable holding this platform's encryption secret.
    pub fn secret_env_var(self) -> &'static str {
        match self {
            Platform::Razorpay => "ENCRYPTION_KEY_RAZORPAY",
            Platform::Stripe => "ENCRYPTION_KEY_STRIPE",
            Platform::Paytm => "ENCRYPTION_KEY_PAYTM",
            Platform::Phonepay => "ENCRYPTION_KEY_PHONEPAY",
        }
    }

    /// Deterministic fallback secret used when no environment secret is set.
    ///
    /// Two processes with no configuration derive the same key, so ciphertext
    /// produced by one is decodable by the other.
    pub fn default_secret(self) -> String {
        format!("{}-default-secret", self.as_str().to_lowercase())
    }
}

impl Algorithm {
    /// Canonical wire name, e.g. `"aes-256-cbc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Aes256Ctr => "aes-256-ctr",
            Algorithm::Aes256Gcm => "aes-256-gcm",
            Algorithm::Aes256Cbc => "aes-256-cbc",
            Algorithm::Camellia256Cbc => "camellia-256-cbc",
        }
    }

    /// Parse a wire name back into an [`Algorithm`], if recognised.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "aes-256-ctr" => Some(Algorithm::Aes256Ctr),
            "aes-256-gcm" => Some(Algorithm::Aes256Gcm),
            "aes-256-cbc" => Some(Algorithm::Aes256Cbc),
            "camellia-256-cbc" => Some(Algorithm::Camellia256Cbc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_all_four() {
        for p in ALL_PLATFORMS {
            assert_eq!(Platform::parse(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = Platform::parse("Unknown").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidPlatform(ref s) if s == "Unknown"));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(Platform::parse("razorpay").is_err());
    }

    #[test]
    fn cipher_mapping_is_exact() {
        let spec = Platform::Razorpay.cipher_spec();
        assert_eq!(spec.algorithm, Algorithm::Aes256Ctr);
        assert_eq!(spec.iv_len, 16);

        let spec = Platform::Stripe.cipher_spec();
        assert_eq!(spec.algorithm, Algorithm::Aes256Gcm);
        assert_eq!(spec.iv_len, 12);

        let spec = Platform::Paytm.cipher_spec();
        assert_eq!(spec.algorithm, Algorithm::Aes256Cbc);
        assert_eq!(spec.iv_len, 16);

        let spec = Platform::Phonepay.cipher_spec();
        assert_eq!(spec.algorithm, Algorithm::Camellia256Cbc);
        assert_eq!(spec.iv_len, 16);
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algo in [
            Algorithm::Aes256Ctr,
            Algorithm::Aes256Gcm,
            Algorithm::Aes256Cbc,
            Algorithm::Camellia256Cbc,
        ] {
            assert_eq!(Algorithm::parse(algo.as_str()), Some(algo));
        }
        assert_eq!(Algorithm::parse("des-ede3"), None);
    }

    #[test]
    fn secret_env_vars_are_uppercase_platform() {
        assert_eq!(
            Platform::Razorpay.secret_env_var(),
            "ENCRYPTION_KEY_RAZORPAY"
        );
        assert_eq!(
            Platform::Phonepay.secret_env_var(),
            "ENCRYPTION_KEY_PHONEPAY"
        );
    }

    #[test]
    fn default_secret_uses_lowercase_name() {
        assert_eq!(
            Platform::Razorpay.default_secret(),
            "razorpay-default-secret"
        );
    }
}
