//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::{EnvSecrets, SecretProvider};
use crate::payments::{PaymentProcessor, RazorpayClient};

/// Application state shared across all request handlers.
///
/// All fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying expensive data. Nothing here is mutable: secrets
/// are re-resolved per call and the processor client is stateless.
#[derive(Clone)]
pub struct AppState {
    /// Per-platform encryption secret lookup (env-backed in production).
    pub secrets: Arc<dyn SecretProvider>,
    /// Payment processor used by `/create-order`.
    pub processor: Arc<dyn PaymentProcessor>,
    /// Merchant key secret used to verify payment callback signatures.
    pub key_secret: Arc<String>,
}

impl AppState {
    /// Create a new [`AppState`] from its collaborator parts.
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        processor: Arc<dyn PaymentProcessor>,
        key_secret: String,
    ) -> Self {
        Self {
            secrets,
            processor,
            key_secret: Arc::new(key_secret),
        }
    }
}

impl Default for AppState {
    /// Default state with env-backed secrets and unauthenticated processor
    /// credentials, suitable for tests that never reach the processor.
    fn default() -> Self {
        Self::new(
            Arc::new(EnvSecrets),
            Arc::new(RazorpayClient::new(
                crate::payments::razorpay::DEFAULT_API_BASE,
                "",
                "",
            )),
            String::new(),
        )
    }
}
