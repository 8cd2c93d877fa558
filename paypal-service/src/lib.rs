pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use services::{PayPalClient, PayPalError};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health_check,
        handlers::orders::create_order,
        handlers::orders::get_order_status,
        handlers::orders::capture_order,
        handlers::orders::cancel_order,
        handlers::webhook::paypal_webhook,
        handlers::oauth::login,
        handlers::oauth::callback,
    ),
    components(
        schemas(
            dtos::CreateOrderResponse,
            dtos::OrderMessageResponse,
            dtos::WebhookAck,
            dtos::LoginResponse,
            dtos::CallbackResponse,
            dtos::ErrorResponse,
        )
    ),
    tags(
        (name = "Orders", description = "PayPal order lifecycle"),
        (name = "Webhooks", description = "Notifications pushed by PayPal"),
        (name = "Authentication", description = "Log in with PayPal"),
        (name = "Observability", description = "Service health and landing page"),
    )
)]
pub struct ApiDoc;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub paypal: PayPalClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PayPalError> {
        let paypal = PayPalClient::new(config.paypal.clone())?;
        Ok(Self { config, paypal })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()))
        // Order endpoints
        .route("/paypal/create", get(handlers::orders::create_order))
        .route("/paypal/status", get(handlers::orders::get_order_status))
        .route("/paypal/success", get(handlers::orders::capture_order))
        .route("/paypal/cancel", get(handlers::orders::cancel_order))
        .route("/paypal/webhook", post(handlers::webhook::paypal_webhook))
        // Log in with PayPal
        .route("/paypal/login", post(handlers::oauth::login))
        .route("/callback", get(handlers::oauth::callback))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}
