#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use paypal_service::config::{Config, PayPalConfig, PayPalEnvironment};
use paypal_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config as core_config;
use tower::util::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_ORDER_ID: &str = "5O190127TN364715T";
pub const APPROVE_LINK: &str = "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T";

pub struct TestApp {
    pub router: Router,
    pub paypal: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("Response body is not JSON")
    }
}

pub fn test_config(paypal_uri: &str) -> Config {
    Config {
        server: core_config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        service_name: "paypal-service-test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        paypal: PayPalConfig {
            client_id: TEST_CLIENT_ID.to_string(),
            client_secret: Secret::new("test-client-secret".to_string()),
            environment: PayPalEnvironment::Sandbox,
            api_base_url: paypal_uri.to_string(),
            authorize_url: format!("{}/signin/authorize", paypal_uri),
            return_url: "http://localhost:8000/paypal/success".to_string(),
            cancel_url: "http://localhost:8000/paypal/cancel".to_string(),
            redirect_uri: "http://localhost:8000/callback".to_string(),
            scopes: vec!["openid".to_string(), "email".to_string()],
            request_timeout_seconds: 5,
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let paypal = MockServer::start().await;
        let state = AppState::new(test_config(&paypal.uri()))
            .expect("Failed to build test application state");

        TestApp {
            router: build_router(state),
            paypal,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            content_type,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Requests PayPal received so far.
    pub async fn paypal_request_count(&self) -> usize {
        self.paypal
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Serve client-credentials tokens for the Orders API.
    pub async fn mock_access_token(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scope": "https://uri.paypal.com/services/payments/payment",
                "access_token": "A21AAFake-app-token",
                "token_type": "Bearer",
                "app_id": "APP-80W284485P519543T",
                "expires_in": 31668
            })))
            .mount(&self.paypal)
            .await;
    }

    /// Serve `GET /v2/checkout/orders/{TEST_ORDER_ID}` with the given status.
    pub async fn mock_order_lookup(&self, status: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v2/checkout/orders/{}", TEST_ORDER_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_body(status)))
            .mount(&self.paypal)
            .await;
    }

    /// Serve the capture endpoint for `TEST_ORDER_ID` with the given status.
    pub async fn mock_capture(&self, status: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v2/checkout/orders/{}/capture", TEST_ORDER_ID)))
            .respond_with(ResponseTemplate::new(201).set_body_json(order_body(status)))
            .mount(&self.paypal)
            .await;
    }
}

pub fn order_body(status: &str) -> Value {
    json!({
        "id": TEST_ORDER_ID,
        "status": status,
        "links": [
            {
                "href": format!("https://api.sandbox.paypal.com/v2/checkout/orders/{}", TEST_ORDER_ID),
                "rel": "self",
                "method": "GET"
            }
        ]
    })
}
