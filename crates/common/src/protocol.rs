//! Request and response types exchanged over the public JSON API.
//!
//! Field names follow the storefront's existing wire contract, which uses
//! camelCase for the codec endpoints and snake_case for the payment endpoints.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encode endpoint
// ---------------------------------------------------------------------------

/// Encrypted representation of a payload, as produced by `POST /encode-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedData {
    /// Canonical cipher name, e.g. `"aes-256-cbc"`.
    pub algorithm: String,
    /// Hex-encoded initialization vector.
    pub iv: String,
    /// Hex-encoded ciphertext.
    pub content: String,
    /// Hex-encoded authentication tag; present for GCM only.
    #[serde(rename = "authTag", skip_serializing_if = "Option::is_none")]
    pub auth_tag: Option<String>,
}

/// Successful response body for `POST /encode-data`.
///
/// Feeding this object verbatim into `POST /decode-data` recovers the
/// original payload, provided the platform's secret has not changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedPayload {
    /// Platform the payload was encoded for.
    pub platform: String,
    /// Base64 rendering of the canonical payload string.
    #[serde(rename = "base64Encoded")]
    pub base64_encoded: String,
    /// Encrypted rendering of the same canonical string.
    pub encrypted: EncryptedData,
    /// `"object"` for structured payloads, otherwise the primitive kind.
    #[serde(rename = "originalDataType")]
    pub original_data_type: String,
}

// ---------------------------------------------------------------------------
// Decode endpoint
// ---------------------------------------------------------------------------

/// Encrypted-payload fields accepted by `POST /decode-data`.
///
/// Unlike [`EncryptedData`], every field is optional: callers may omit the
/// algorithm (it is then inferred from the platform) and a payload missing
/// its IV or content simply contributes no decrypted result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncryptedInput {
    /// Canonical cipher name; inferred from the platform when absent.
    pub algorithm: Option<String>,
    /// Hex-encoded initialization vector.
    pub iv: Option<String>,
    /// Hex-encoded ciphertext.
    pub content: Option<String>,
    /// Hex-encoded authentication tag (GCM).
    #[serde(rename = "authTag")]
    pub auth_tag: Option<String>,
}

/// Raw body of `POST /decode-data`, before normalization.
///
/// Two naming conventions are accepted for each input: the request naming
/// (`encodedData`, `encryptedData`, `dataType`) and the encode-service output
/// naming (`base64Encoded`, `encrypted`, `originalDataType`). See
/// [`RawDecodeRequest::normalize`] for the precedence rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDecodeRequest {
    /// Platform label selecting the cipher and secret configuration.
    pub platform: Option<String>,
    /// Base64 input, request naming.
    #[serde(rename = "encodedData")]
    pub encoded_data: Option<String>,
    /// Base64 input, encode-output naming.
    #[serde(rename = "base64Encoded")]
    pub base64_encoded: Option<String>,
    /// Encrypted input, request naming.
    #[serde(rename = "encryptedData")]
    pub encrypted_data: Option<EncryptedInput>,
    /// Encrypted input, encode-output naming.
    pub encrypted: Option<EncryptedInput>,
    /// Data-type hint, request naming.
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    /// Data-type hint, encode-output naming.
    #[serde(rename = "originalDataType")]
    pub original_data_type: Option<String>,
}

/// Canonical decode request produced by [`RawDecodeRequest::normalize`].
#[derive(Debug, Clone, Default)]
pub struct DecodeInput {
    /// Platform label, still unvalidated at this point.
    pub platform: Option<String>,
    /// Base64 rendering of the canonical payload string, if supplied.
    pub base64_encoded: Option<String>,
    /// Encrypted rendering, if supplied.
    pub encrypted: Option<EncryptedInput>,
    /// `"object"` requests a structured (JSON) parse of the recovered string.
    pub data_type: Option<String>,
}

impl RawDecodeRequest {
    /// Collapse the aliased field pairs into one canonical shape.
    ///
    /// When both namings are present for the same input, the encode-output
    /// naming (`base64Encoded`, `encrypted`, `originalDataType`) wins.
    pub fn normalize(self) -> DecodeInput {
        DecodeInput {
            platform: self.platform,
            base64_encoded: self.base64_encoded.or(self.encoded_data),
            encrypted: self.encrypted.or(self.encrypted_data),
            data_type: self.original_data_type.or(self.data_type),
        }
    }
}

/// Successful response body for `POST /decode-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeResponse {
    /// The recovered payload: a JSON object for `"object"` hints, otherwise
    /// the recovered string.
    pub data: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Payment endpoints
// ---------------------------------------------------------------------------

/// Request body for `POST /create-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Order amount in major currency units (e.g. rupees).
    pub amount: f64,
    /// ISO currency code, e.g. `"INR"`.
    pub currency: String,
    /// Optional free-form notes forwarded to the processor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<serde_json::Value>,
}

/// Successful response body for `POST /create-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// Processor-assigned order id.
    pub id: String,
    /// ISO currency code echoed from the processor.
    pub currency: String,
    /// Order amount in minor currency units (e.g. paise).
    pub amount: i64,
}

/// Request body for `POST /verify-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    /// Processor-assigned payment id.
    pub payment_id: String,
    /// Processor-assigned order id.
    pub order_id: String,
    /// Hex-encoded HMAC-SHA256 signature supplied by the processor callback.
    pub signature: String,
}

/// Successful response body for `POST /verify-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    /// Always `"verified"` on a 200 response.
    pub status: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description safe to expose to callers.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
