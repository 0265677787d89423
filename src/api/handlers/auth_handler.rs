//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{ForgotPasswordResponse, LoginResponse};
use crate::types::MessageResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username and password are required"))]
    #[schema(example = "admin")]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1, message = "Username and password are required"))]
    #[schema(example = "Secure#2024")]
    #[serde(default)]
    pub password: String,
}

/// Forgot-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "admin")]
    #[serde(default)]
    pub username: String,
}

/// Reset-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Token from the reset link
    #[validate(length(min = 1, message = "Token and new password are required"))]
    #[serde(default)]
    pub token: String,
    #[validate(length(min = 1, message = "Token and new password are required"))]
    #[schema(example = "NewSecure#2024")]
    #[serde(default)]
    pub new_password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Server or configuration error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(response))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Same reply whether or not the user exists", body = ForgotPasswordResponse),
        (status = 400, description = "Missing username")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Json<ForgotPasswordResponse>> {
    let response = state.auth_service.forgot_password(payload.username).await?;
    Ok(Json(response))
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Policy failure (with requirements), reused password, or invalid/expired token"),
        (status = 404, description = "User no longer exists")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let response = state
        .auth_service
        .reset_password(payload.token, payload.new_password)
        .await?;

    Ok(Json(response))
}
