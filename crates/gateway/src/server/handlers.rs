//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    CreateOrderRequest, CreateOrderResponse, DecodeResponse, ErrorResponse, RawDecodeRequest,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use common::ServiceError;
use tracing::warn;
use uuid::Uuid;

use super::state::AppState;
use crate::codec;
use crate::payments::verify_signature;

/// `GET /` — liveness check.
pub async fn welcome() -> &'static str {
    "Payment broker service is running"
}

/// `POST /encode-data` — encode the request body for a platform.
///
/// The whole JSON body is the payload; the `platform` field is read out of it
/// (and encoded along with the rest).
pub async fn encode_data(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let is_empty = body.as_object().map_or(true, |obj| obj.is_empty());
    if is_empty {
        let err = ErrorResponse::new("request body is required");
        return (StatusCode::BAD_REQUEST, Json(err)).into_response();
    }

    let platform = match body.get("platform").and_then(serde_json::Value::as_str) {
        Some(p) => p.to_owned(),
        None => {
            let err = ErrorResponse::new("platform is required");
            return (StatusCode::BAD_REQUEST, Json(err)).into_response();
        }
    };

    match codec::encode(&body, &platform, state.secrets.as_ref()) {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /decode-data` — recover a payload from its encoded representations.
///
/// Accepts both the request field naming (`encodedData`, `encryptedData`,
/// `dataType`) and the encode-output naming (`base64Encoded`, `encrypted`,
/// `originalDataType`); the latter wins when both are present.
pub async fn decode_data(
    State(state): State<AppState>,
    Json(body): Json<RawDecodeRequest>,
) -> Response {
    match codec::decode(body.normalize(), state.secrets.as_ref()) {
        Ok(data) => (StatusCode::OK, Json(DecodeResponse { data })).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /create-order` — create an order with the payment processor.
///
/// The caller supplies the amount in major units; it is converted to minor
/// units (×100) before the processor call.
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Response {
    let amount_minor = (req.amount * 100.0).round() as i64;
    let receipt = format!("receipt_{}", Uuid::new_v4().simple());

    match state
        .processor
        .create_order(amount_minor, req.currency, receipt, req.notes)
        .await
    {
        Ok(order) => (
            StatusCode::OK,
            Json(CreateOrderResponse {
                id: order.id,
                currency: order.currency,
                amount: order.amount,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /verify-payment` — verify a processor callback signature.
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Response {
    if verify_signature(
        &req.order_id,
        &req.payment_id,
        &req.signature,
        &state.key_secret,
    ) {
        (
            StatusCode::OK,
            Json(VerifyPaymentResponse {
                status: "verified".into(),
            }),
        )
            .into_response()
    } else {
        let err = ErrorResponse::new("invalid payment signature");
        (StatusCode::BAD_REQUEST, Json(err)).into_response()
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Render a [`ServiceError`] as its JSON error body and mapped status code.
fn error_response(err: ServiceError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(error = %err, "request failed");
    }
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}
