//! PayPal Orders v2 and OAuth wire types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status as reported by PayPal.
///
/// Unknown values are kept verbatim so they can be echoed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Created,
    Saved,
    Approved,
    Voided,
    Completed,
    PayerActionRequired,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Saved => "SAVED",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Voided => "VOIDED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::PayerActionRequired => "PAYER_ACTION_REQUIRED",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CREATED" => OrderStatus::Created,
            "SAVED" => OrderStatus::Saved,
            "APPROVED" => OrderStatus::Approved,
            "VOIDED" => OrderStatus::Voided,
            "COMPLETED" => OrderStatus::Completed,
            "PAYER_ACTION_REQUIRED" => OrderStatus::PayerActionRequired,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HATEOAS link attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDescription {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// The subset of an order resource the gateway reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

impl Order {
    /// The URL the payer must visit to approve the order.
    pub fn approval_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderIntent {
    Capture,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationContext {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseUnit {
    pub amount: Amount,
}

/// Body of `POST /v2/checkout/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub intent: OrderIntent,
    pub application_context: ApplicationContext,
    pub purchase_units: Vec<PurchaseUnit>,
}

impl CreateOrderRequest {
    /// Single purchase unit, captured immediately after payer approval.
    pub fn capture(
        value: &str,
        currency_code: &str,
        return_url: &str,
        cancel_url: &str,
    ) -> Self {
        Self {
            intent: OrderIntent::Capture,
            application_context: ApplicationContext {
                return_url: return_url.to_string(),
                cancel_url: cancel_url.to_string(),
            },
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: currency_code.to_string(),
                    value: value.to_string(),
                },
            }],
        }
    }
}

/// Response of the `/v1/oauth2/token` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
