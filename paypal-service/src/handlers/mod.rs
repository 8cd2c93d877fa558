//! HTTP handlers for paypal-service.

pub mod oauth;
pub mod orders;
pub mod webhook;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::json;

const LANDING_PAGE: &str = r#"<html>
    <head>
        <title>Paypal</title>
    </head>
    <body>
        Welcome to the PayPal integration API. <br>
        Check <a href="/docs">the link</a> for more details.
    </body>
</html>
"#;

/// Landing page pointing at the API documentation.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Static welcome page", body = String, content_type = "text/html")
    ),
    tag = "Observability"
)]
pub async fn root() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Liveness probe. Never contacts PayPal.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "Observability"
)]
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "paypal-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        crate::services::get_metrics(),
    )
}
