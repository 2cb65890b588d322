//! Razorpay orders API client.

use async_trait::async_trait;
use common::ServiceError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{PaymentProcessor, ProcessorOrder};

/// Default base URL of the Razorpay REST API.
pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com";

/// HTTP client for the Razorpay orders API, authenticated with the merchant's
/// key id and secret via HTTP basic auth.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    api_base: String,
    key_id: String,
    key_secret: String,
}

#[derive(Debug, Serialize)]
struct OrderBody {
    amount: i64,
    currency: String,
    receipt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OrderReply {
    id: String,
    currency: String,
    amount: i64,
}

impl RazorpayClient {
    /// Build a client from merchant credentials and an optional API base
    /// override (used by tests to point at a stub server).
    pub fn new(api_base: impl Into<String>, key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[async_trait]
impl PaymentProcessor for RazorpayClient {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: String,
        receipt: String,
        notes: Option<serde_json::Value>,
    ) -> Result<ProcessorOrder, ServiceError> {
        let url = format!("{}/v1/orders", self.api_base);
        let body = OrderBody {
            amount: amount_minor,
            currency,
            receipt,
            notes,
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::OrderCreationFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "order creation rejected by processor");
            return Err(ServiceError::OrderCreationFailed(format!(
                "processor returned {status}: {detail}"
            )));
        }

        let reply: OrderReply = response
            .json()
            .await
            .map_err(|e| ServiceError::OrderCreationFailed(e.to_string()))?;

        info!(order_id = %reply.id, amount = reply.amount, "order created");
        Ok(ProcessorOrder {
            id: reply.id,
            currency: reply.currency,
            amount: reply.amount,
        })
    }
}
