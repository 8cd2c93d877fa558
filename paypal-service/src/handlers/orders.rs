//! Order handlers: create, status, success (capture) and cancel.
//!
//! Create and status fail soft: any PayPal failure degrades to a null result
//! and is only visible in the logs. Success and cancel fail loud with a 500
//! carrying the PayPal error message.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{
        CreateOrderQuery, CreateOrderResponse, ErrorResponse, OrderMessageResponse,
        OrderStatusQuery, OrderTokenQuery,
    },
    models::OrderStatus,
    services::PayPalError,
    AppState,
};

/// Create a PayPal order and return its approval link.
#[utoipa::path(
    get,
    path = "/paypal/create",
    params(CreateOrderQuery),
    responses(
        (status = 200, description = "Order created, or nulls when PayPal failed", body = CreateOrderResponse)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Query(query): Query<CreateOrderQuery>,
) -> Json<CreateOrderResponse> {
    tracing::info!(
        value = %query.value,
        currency_code = %query.currency_code,
        "Creating PayPal order"
    );

    let order = match state
        .paypal
        .create_order(&query.value, &query.currency_code)
        .await
    {
        Ok(order) => order,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create order");
            return Json(CreateOrderResponse::unavailable());
        }
    };

    match order.approval_link() {
        Some(link) => Json(CreateOrderResponse {
            order_id: Some(order.id.clone()),
            order_link: Some(link.to_string()),
        }),
        None => {
            tracing::warn!(order_id = %order.id, "PayPal order has no approve link");
            Json(CreateOrderResponse::unavailable())
        }
    }
}

/// Current PayPal status of an order, or `null` when the lookup fails.
#[utoipa::path(
    get,
    path = "/paypal/status",
    params(OrderStatusQuery),
    responses(
        (status = 200, description = "Status string, or null on failure", body = String),
        (status = 400, description = "Missing order id", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn get_order_status(
    State(state): State<AppState>,
    Query(query): Query<OrderStatusQuery>,
) -> Result<Json<Option<OrderStatus>>, AppError> {
    let order_id = query.into_order_id()?;

    match state.paypal.get_order(&order_id).await {
        Ok(order) => Ok(Json(Some(order.status))),
        Err(e) => {
            tracing::error!(order_id = %order_id, error = %e, "Failed to get order status");
            Ok(Json(None))
        }
    }
}

/// PayPal return URL: capture the approved order.
#[utoipa::path(
    get,
    path = "/paypal/success",
    params(OrderTokenQuery),
    responses(
        (status = 200, description = "Payment captured", body = OrderMessageResponse),
        (status = 400, description = "Missing order id or capture not completed", body = ErrorResponse),
        (status = 500, description = "PayPal call failed", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn capture_order(
    State(state): State<AppState>,
    Query(query): Query<OrderTokenQuery>,
) -> Result<Json<OrderMessageResponse>, AppError> {
    let order_id = query.into_order_id()?;

    let order = state
        .paypal
        .capture_order(&order_id)
        .await
        .map_err(|e| upstream_error(&order_id, e))?;

    if order.status != OrderStatus::Completed {
        tracing::warn!(order_id = %order_id, status = %order.status, "Capture did not complete");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Payment not completed. Status: {}",
            order.status
        )));
    }

    tracing::info!(order_id = %order_id, "Payment captured");

    Ok(Json(OrderMessageResponse {
        message: "Payment successful".to_string(),
        order_id,
    }))
}

/// PayPal cancel URL: report what cancelling means for the order's status.
#[utoipa::path(
    get,
    path = "/paypal/cancel",
    params(OrderTokenQuery),
    responses(
        (status = 200, description = "Order was only created and is abandoned", body = OrderMessageResponse),
        (status = 202, description = "Order needs manual review", body = OrderMessageResponse),
        (status = 409, description = "Order already processed", body = OrderMessageResponse),
        (status = 400, description = "Missing order id", body = ErrorResponse),
        (status = 500, description = "PayPal call failed", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Query(query): Query<OrderTokenQuery>,
) -> Result<(StatusCode, Json<OrderMessageResponse>), AppError> {
    let order_id = query.into_order_id()?;

    let order = state
        .paypal
        .get_order(&order_id)
        .await
        .map_err(|e| upstream_error(&order_id, e))?;

    let (status_code, message) = cancellation_outcome(&order.status);

    tracing::info!(
        order_id = %order_id,
        status = %order.status,
        response_status = %status_code,
        "Order cancellation handled"
    );

    Ok((status_code, Json(OrderMessageResponse { message, order_id })))
}

/// Map an order status to the cancel endpoint's response.
pub fn cancellation_outcome(status: &OrderStatus) -> (StatusCode, String) {
    match status {
        OrderStatus::Created => (StatusCode::OK, "Order cancelled successfully".to_string()),
        OrderStatus::Completed | OrderStatus::Approved => (
            StatusCode::CONFLICT,
            "Order already processed, please initiate a refund if needed".to_string(),
        ),
        other => (
            StatusCode::ACCEPTED,
            format!("Order in {} status, manual review required", other),
        ),
    }
}

fn upstream_error(order_id: &str, err: PayPalError) -> AppError {
    tracing::error!(order_id = %order_id, error = %err, "PayPal order call failed");
    AppError::InternalError(anyhow::Error::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_is_cancelled() {
        let (status, message) = cancellation_outcome(&OrderStatus::Created);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message, "Order cancelled successfully");
    }

    #[test]
    fn test_processed_orders_conflict() {
        for status in [OrderStatus::Completed, OrderStatus::Approved] {
            assert_eq!(cancellation_outcome(&status).0, StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_other_statuses_need_review() {
        let (status, message) = cancellation_outcome(&OrderStatus::Other("PENDING".into()));
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(message, "Order in PENDING status, manual review required");

        let (status, _) = cancellation_outcome(&OrderStatus::Voided);
        assert_eq!(status, StatusCode::ACCEPTED);
    }
}
