//! PayPal REST client.
//!
//! Covers the Orders v2 calls the gateway forwards (create, lookup, capture)
//! and the "Log in with PayPal" authorization-code exchange.

use crate::config::PayPalConfig;
use crate::models::{CreateOrderRequest, Order, TokenResponse};
use crate::services::metrics::record_api_call;
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayPalError {
    #[error("PayPal request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("PayPal API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("Failed to decode PayPal response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// PayPal client. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct PayPalClient {
    client: Client,
    config: PayPalConfig,
}

impl PayPalClient {
    pub fn new(config: PayPalConfig) -> Result<Self, PayPalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Login URL for the authorization-code flow. Scopes are joined with an
    /// encoded space in configuration order.
    pub fn authorization_url(&self) -> String {
        let scope = self
            .config
            .scopes
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("%20");

        format!(
            "{}?client_id={}&response_type=code&scope={}&redirect_uri={}",
            self.config.authorize_url,
            urlencoding::encode(&self.config.client_id),
            scope,
            urlencoding::encode(&self.config.redirect_uri)
        )
    }

    /// Create an order with intent `CAPTURE` and the configured redirect URLs.
    pub async fn create_order(&self, value: &str, currency_code: &str) -> Result<Order, PayPalError> {
        observe("create_order", async {
            let request = CreateOrderRequest::capture(
                value,
                currency_code,
                &self.config.return_url,
                &self.config.cancel_url,
            );
            let token = self.access_token().await?;

            let response = self
                .client
                .post(format!("{}/v2/checkout/orders", self.config.api_base_url))
                .bearer_auth(token)
                .header("Prefer", "return=representation")
                .json(&request)
                .send()
                .await?;

            let order: Order = read_json(response, Accept::AnySuccess).await?;
            tracing::info!(order_id = %order.id, status = %order.status, "PayPal order created");
            Ok(order)
        })
        .await
    }

    /// Fetch an order by id.
    pub async fn get_order(&self, order_id: &str) -> Result<Order, PayPalError> {
        observe("get_order", async {
            let token = self.access_token().await?;

            let response = self
                .client
                .get(self.order_url(order_id))
                .bearer_auth(token)
                .send()
                .await?;

            read_json(response, Accept::AnySuccess).await
        })
        .await
    }

    /// Capture payment for an approved order.
    pub async fn capture_order(&self, order_id: &str) -> Result<Order, PayPalError> {
        observe("capture_order", async {
            let token = self.access_token().await?;

            let response = self
                .client
                .post(format!("{}/capture", self.order_url(order_id)))
                .bearer_auth(token)
                .header("Prefer", "return=representation")
                .json(&serde_json::json!({}))
                .send()
                .await?;

            let order: Order = read_json(response, Accept::AnySuccess).await?;
            tracing::info!(order_id = %order.id, status = %order.status, "PayPal capture finished");
            Ok(order)
        })
        .await
    }

    /// Exchange a login authorization code for a user access token.
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
    ) -> Result<TokenResponse, PayPalError> {
        observe("exchange_authorization_code", async {
            let response = self
                .client
                .post(self.token_url())
                .basic_auth(
                    &self.config.client_id,
                    Some(self.config.client_secret.expose_secret()),
                )
                .form(&[("grant_type", "authorization_code"), ("code", code)])
                .send()
                .await?;

            read_json(response, Accept::OkOnly).await
        })
        .await
    }

    /// Fetch the OpenID Connect profile of the user owning `access_token`.
    pub async fn fetch_user_info(
        &self,
        access_token: &str,
    ) -> Result<serde_json::Value, PayPalError> {
        observe("fetch_user_info", async {
            let response = self
                .client
                .get(format!(
                    "{}/v1/identity/openidconnect/userinfo",
                    self.config.api_base_url
                ))
                .query(&[("schema", "openid")])
                .bearer_auth(access_token)
                .send()
                .await?;

            read_json(response, Accept::OkOnly).await
        })
        .await
    }

    /// Client-credentials token for the Orders API. A fresh token is
    /// requested for every call; nothing is cached between requests.
    async fn access_token(&self) -> Result<String, PayPalError> {
        let response = self
            .client
            .post(self.token_url())
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = read_json(response, Accept::AnySuccess).await?;
        Ok(token.access_token)
    }

    fn token_url(&self) -> String {
        format!("{}/v1/oauth2/token", self.config.api_base_url)
    }

    fn order_url(&self, order_id: &str) -> String {
        format!(
            "{}/v2/checkout/orders/{}",
            self.config.api_base_url,
            urlencoding::encode(order_id)
        )
    }
}

async fn observe<T, F>(operation: &'static str, call: F) -> Result<T, PayPalError>
where
    F: Future<Output = Result<T, PayPalError>>,
{
    let result = call.await;
    if let Err(ref e) = result {
        tracing::warn!(operation, error = %e, "PayPal call failed");
    }
    record_api_call(operation, result.is_ok());
    result
}

/// Statuses treated as success when reading a PayPal response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    /// Any 2xx. Orders answers 201 on create and capture.
    AnySuccess,
    /// 200 only. Used by the login token exchange and userinfo.
    OkOnly,
}

impl Accept {
    fn allows(self, status: StatusCode) -> bool {
        match self {
            Accept::AnySuccess => status.is_success(),
            Accept::OkOnly => status == StatusCode::OK,
        }
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    accept: Accept,
) -> Result<T, PayPalError> {
    let status = response.status();
    let body = response.text().await?;

    tracing::debug!(status = %status, "PayPal response received");

    if !accept.allows(status) {
        return Err(PayPalError::Api { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}
