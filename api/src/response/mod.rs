//! Response envelope and error mapping shared by every handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::AppError;

/// Standardized wrapper for auth, account and health responses, and for every
/// error:
/// ```json
/// {
///   "success": false,
///   "data": {},
///   "message": "Course required for course mode"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error responses carry `T::default()` as data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Serializes as `{}`.
#[derive(Serialize, Default)]
pub struct Empty {}

/// `{"message": ...}` bodies.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An error on its way out of a handler.
#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Failures outside the services layer; the detail is logged, not sent.
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::App(AppError::Validation(message.into()))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            Self::App(AppError::Validation(m)) => (StatusCode::BAD_REQUEST, m),
            Self::App(AppError::Unauthorized(m)) => (StatusCode::UNAUTHORIZED, m),
            Self::App(AppError::Forbidden(m)) => (StatusCode::FORBIDDEN, m),
            Self::App(AppError::NotFound(m)) => (StatusCode::NOT_FOUND, m),
            Self::App(AppError::Storage(e)) => {
                tracing::error!(error = %e, "storage failure");
                internal_server_error()
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal failure");
                internal_server_error()
            }
        }
    }
}

fn internal_server_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_owned(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ApiResponse::<Empty>::error(message))).into_response()
    }
}
