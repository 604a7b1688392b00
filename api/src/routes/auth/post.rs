use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::Role;
use serde::{Deserialize, Serialize};
use services::user_service::UserService;
use util::state::AppState;
use validator::Validate;

use crate::auth::{AuthUser, generate_jwt};
use crate::response::{ApiError, ApiResponse, ApiResult, Empty};
use crate::routes::common::validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Exchanges a username and password for a bearer token.
///
/// ### Request Body
/// ```json
/// { "username": "admin", "password": "admin123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ id, username, role, token, expires_at }` as data
/// - `400 Bad Request` when a field is blank
/// - `401 Unauthorized` on bad credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    validate(&req)?;

    let user = UserService::login(state.db(), &req.username, &req.password).await?;
    let (token, expires_at) = generate_jwt(user.id, &user.username, user.role == Role::Admin)
        .map_err(|e| ApiError::internal(format!("failed to sign token: {e}")))?;

    let response = LoginResponse {
        id: user.id,
        username: user.username,
        role: user.role.to_string(),
        token,
        expires_at,
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(response, "Login successful")),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// POST /auth/change_password
///
/// Changes the caller's own password. Checks run in order: current password,
/// non-empty new password, confirmation match; the first failure is a 400.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = UserService::change_password(
        state.db(),
        &claims.username,
        &req.current_password,
        &req.new_password,
        &req.confirm_password,
    )
    .await?;

    Ok(Json(ApiResponse::success(Empty::default(), message)))
}
