use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateOrderQuery {
    /// Order total as a decimal string.
    #[serde(default = "default_value")]
    #[param(example = "100.00")]
    pub value: String,
    /// ISO 4217 currency code.
    #[serde(default = "default_currency_code")]
    #[param(example = "USD")]
    pub currency_code: String,
}

fn default_value() -> String {
    "100.00".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

/// Both fields are null when the order could not be created.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateOrderResponse {
    #[schema(example = "5O190127TN364715T")]
    pub order_id: Option<String>,
    #[schema(example = "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T")]
    pub order_link: Option<String>,
}

impl CreateOrderResponse {
    pub fn unavailable() -> Self {
        Self {
            order_id: None,
            order_link: None,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderStatusQuery {
    pub order_id: Option<String>,
}

impl OrderStatusQuery {
    pub fn into_order_id(self) -> Result<String, AppError> {
        self.order_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No order ID provided")))
    }
}

/// Order reference on the PayPal return/cancel redirects. PayPal appends it
/// as `token`; `order_id` is accepted for direct calls.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderTokenQuery {
    pub token: Option<String>,
    pub order_id: Option<String>,
}

impl OrderTokenQuery {
    pub fn into_order_id(self) -> Result<String, AppError> {
        self.token
            .filter(|t| !t.is_empty())
            .or(self.order_id.filter(|id| !id.is_empty()))
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No order ID provided")))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderMessageResponse {
    #[schema(example = "Payment successful")]
    pub message: String,
    pub order_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    #[schema(example = "success")]
    pub status: String,
}

impl WebhookAck {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub redirect_url: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CallbackResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(value_type = Object)]
    pub user_info: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Bad request")]
    pub error: String,
    #[schema(example = "No order ID provided")]
    pub detail: String,
}
