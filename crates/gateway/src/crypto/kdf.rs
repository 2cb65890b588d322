//! Per-platform symmetric key derivation.
//!
//! The key is SHA-256 of the platform's secret string, rendered as standard
//! base64, truncated to its first 32 *characters*. The cipher key is the
//! ASCII bytes of that prefix — not 32 decoded digest bytes. This matches the
//! ciphertext format already deployed with the storefront and must not be
//! "corrected" without a coordinated key migration.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use super::platform::Platform;

/// Byte length of a derived cipher key (32 bytes = 256 bits of key input).
pub const KEY_LEN: usize = 32;

/// Capability supplying the configured secret for a platform, if any.
///
/// Injected instead of reading the process environment inline so that key
/// derivation stays pure and testable.
pub trait SecretProvider: Send + Sync {
    /// The configured secret for `platform`, or `None` to use the default.
    fn secret(&self, platform: Platform) -> Option<String>;
}

/// Production [`SecretProvider`] backed by `ENCRYPTION_KEY_<PLATFORM>`
/// environment variables, resolved on every call (no caching).
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets;

impl SecretProvider for EnvSecrets {
    fn secret(&self, platform: Platform) -> Option<String> {
        std::env::var(platform.secret_env_var()).ok()
    }
}

/// Derive the 32-byte cipher key for `platform`.
///
/// Falls back to the platform's deterministic default secret when none is
/// configured; never fails.
pub fn derive_key(platform: Platform, secrets: &dyn SecretProvider) -> [u8; KEY_LEN] {
    let secret = secrets
        .secret(platform)
        .unwrap_or_else(|| platform.default_secret());

    let digest = Sha256::digest(secret.as_bytes());
    let encoded = STANDARD.encode(digest);

    // Base64 of a 32-byte digest is 44 characters, so 32 are always there.
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&encoded.as_bytes()[..KEY_LEN]);
    key
}
