//! `/auth` routes: login and password change.

pub mod post;

use axum::{Router, middleware::from_fn, routing::post};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use post::{change_password, login};

/// - `POST /auth/login` → `login` (public)
/// - `POST /auth/change_password` → `change_password` (any session)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/change_password",
            post(change_password).route_layer(from_fn(allow_authenticated)),
        )
        .route("/login", post(login))
}
