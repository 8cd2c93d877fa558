//! "Log in with PayPal" authorization-code flow.

use axum::{
    extract::{Query, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{CallbackQuery, CallbackResponse, ErrorResponse, LoginResponse},
    AppState,
};

/// Build the PayPal login URL. The caller is expected to follow it.
#[utoipa::path(
    post,
    path = "/paypal/login",
    responses(
        (status = 200, description = "Authorization URL", body = LoginResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(State(state): State<AppState>) -> Json<LoginResponse> {
    Json(LoginResponse {
        redirect_url: state.paypal.authorization_url(),
    })
}

/// OAuth redirect target: trade the code for a token, then read the profile.
#[utoipa::path(
    get,
    path = "/callback",
    params(CallbackQuery),
    responses(
        (status = 200, description = "User logged in", body = CallbackResponse),
        (status = 400, description = "Missing code or PayPal rejected the exchange", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<CallbackResponse>, AppError> {
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Authorization code not provided")))?;

    let token = state
        .paypal
        .exchange_authorization_code(&code)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "PayPal token exchange failed");
            AppError::BadRequest(anyhow::anyhow!("Failed to obtain access token"))
        })?;

    let user_info = state
        .paypal
        .fetch_user_info(&token.access_token)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "PayPal user info request failed");
            AppError::BadRequest(anyhow::anyhow!("Failed to fetch user info"))
        })?;

    tracing::info!("User logged in with PayPal");

    Ok(Json(CallbackResponse {
        message: "Login successful".to_string(),
        user_info,
    }))
}
