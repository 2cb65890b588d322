//! Payment-processor collaborators: order creation and callback signatures.
//!
//! The processor sits behind the [`PaymentProcessor`] trait so that handler
//! tests can mock it; the production implementation is
//! [`razorpay::RazorpayClient`], a thin client over the processor's REST
//! orders API.

pub mod razorpay;
pub mod signature;

use async_trait::async_trait;
use common::ServiceError;

pub use razorpay::RazorpayClient;
pub use signature::verify_signature;

/// An order as confirmed by the payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorOrder {
    /// Processor-assigned order id.
    pub id: String,
    /// ISO currency code.
    pub currency: String,
    /// Amount in minor currency units.
    pub amount: i64,
}

/// Capability to create orders against the external payment processor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an order for `amount_minor` minor currency units.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::OrderCreationFailed`] when the processor call
    /// fails or returns a non-success status.
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: String,
        receipt: String,
        notes: Option<serde_json::Value>,
    ) -> Result<ProcessorOrder, ServiceError>;
}
