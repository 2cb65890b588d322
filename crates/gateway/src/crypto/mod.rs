//! Platform-keyed encryption primitives.
//!
//! Three layers, lowest first:
//! - [`platform`] — the closed platform set and its static cipher policies.
//! - [`kdf`] — per-platform key derivation from configured or default secrets.
//! - [`cipher`] — byte-level encrypt/decrypt dispatch over the four algorithms.
//!
//! Keys are derived fresh on every call; nothing in this module caches or
//! persists key material.

pub mod cipher;
pub mod kdf;
pub mod platform;

pub use kdf::{derive_key, EnvSecrets, SecretProvider, KEY_LEN};
pub use platform::{Algorithm, CipherSpec, Platform};
