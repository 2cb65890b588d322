//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::InvalidPlatform`] → 400
/// - [`ServiceError::MissingInput`] → 400
/// - [`ServiceError::DecryptionFailed`] → 400
/// - [`ServiceError::EncodingFailed`] → 500
/// - [`ServiceError::NoResult`] → 500
/// - [`ServiceError::OrderCreationFailed`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The platform string is not one of the supported gateways.
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),

    /// A decode request carried neither encoded nor encrypted data.
    #[error("no encoded or encrypted data provided")]
    MissingInput,

    /// Serialization or encryption failed while encoding a payload.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    /// Decryption failed and no base64 fallback was available.
    ///
    /// Usually indicates bad ciphertext, a wrong IV, or a platform mismatch
    /// on the caller's side, so this maps to a client error.
    #[error("decryption failed for {platform}: {detail}")]
    DecryptionFailed {
        /// Platform the caller asked to decrypt for.
        platform: String,
        /// Underlying cipher-layer detail.
        detail: String,
    },

    /// Neither decode path produced a result. Unreachable when the decode
    /// steps are implemented correctly, hence a server error.
    #[error("no decodable result produced")]
    NoResult,

    /// The payment processor rejected or failed the order-creation call.
    #[error("order creation failed: {0}")]
    OrderCreationFailed(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::InvalidPlatform(_) => 400,
            ServiceError::MissingInput => 400,
            ServiceError::DecryptionFailed { .. } => 400,
            ServiceError::EncodingFailed(_) => 500,
            ServiceError::NoResult => 500,
            ServiceError::OrderCreationFailed(_) => 500,
        }
    }
}
