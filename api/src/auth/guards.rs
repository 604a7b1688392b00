use axum::{
    body::Body,
    extract::FromRequestParts,
    http::Request,
    middleware::Next,
    response::Response,
};
use services::AppError;

use crate::auth::claims::AuthUser;
use crate::response::ApiError;

pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
pub const ADMIN_REQUIRED: &str = "Admin access required";

/// Extracts the caller and inserts it into request extensions for handlers.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::Unauthorized(AUTHENTICATION_REQUIRED.into()))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Any logged-in user.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.admin {
        return Err(AppError::Forbidden(ADMIN_REQUIRED.into()).into());
    }

    Ok(next.run(req).await)
}
