//! PayPal webhook receiver.
//!
//! Events are checked for shape only. The sender is not authenticated: no
//! transmission signature or certificate check is performed.

use axum::{body::Bytes, Json};
use serde_json::Value;
use service_core::error::AppError;

use crate::dtos::{ErrorResponse, WebhookAck};

pub const CAPTURE_COMPLETED: &str = "PAYMENT.CAPTURE.COMPLETED";
pub const CAPTURE_DENIED: &str = "PAYMENT.CAPTURE.DENIED";

/// Acknowledge a PayPal webhook event.
#[utoipa::path(
    post,
    path = "/paypal/webhook",
    request_body(content = Object, description = "PayPal webhook event", content_type = "application/json"),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 400, description = "Invalid JSON or missing key", body = ErrorResponse),
        (status = 500, description = "Unexpected payload", body = ErrorResponse)
    ),
    tag = "Webhooks"
)]
pub async fn paypal_webhook(body: Bytes) -> Result<Json<WebhookAck>, AppError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Webhook body is not valid JSON");
        AppError::BadRequest(anyhow::anyhow!("Invalid JSON"))
    })?;

    let event_type = required(&payload, "event_type")?;

    match event_type.as_str() {
        Some(CAPTURE_COMPLETED) => {
            let order_id = required(required(&payload, "resource")?, "id")?;
            match order_id.as_str() {
                Some(id) => tracing::info!(order_id = %id, "Payment completed"),
                None => tracing::info!(order_id = %order_id, "Payment completed"),
            }
            Ok(Json(WebhookAck::new("success")))
        }
        Some(CAPTURE_DENIED) => {
            tracing::info!("Payment denied");
            Ok(Json(WebhookAck::new("payment denied")))
        }
        _ => {
            tracing::debug!(event_type = %event_type, "Unhandled webhook event type");
            Ok(Json(WebhookAck::new("unhandled event")))
        }
    }
}

/// Look up `key` in a JSON object. A missing key is the sender's fault (400);
/// indexing into a non-object is an unexpected payload (500).
fn required<'a>(value: &'a Value, key: &str) -> Result<&'a Value, AppError> {
    let object = value.as_object().ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!(
            "Cannot read '{}' from non-object JSON value",
            key
        ))
    })?;

    object
        .get(key)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing key in payload: '{}'", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_missing_key() {
        let err = required(&json!({"resource": {}}), "event_type").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad request: Missing key in payload: 'event_type'"
        );
    }

    #[test]
    fn test_required_non_object() {
        let err = required(&json!(["event_type"]), "event_type").unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn test_required_present() {
        let payload = json!({"resource": {"id": "8MC585209K746392H"}});
        let id = required(required(&payload, "resource").unwrap(), "id").unwrap();
        assert_eq!(id, "8MC585209K746392H");
    }
}
