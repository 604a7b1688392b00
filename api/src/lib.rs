//! HTTP and websocket surface of the attendance service.

pub mod auth;
pub mod response;
pub mod routes;
pub mod ws;

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
};
use tower_http::cors::CorsLayer;
use util::state::AppState;

/// The complete application: every route group plus CORS.
pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    routes::routes(app_state).layer(cors)
}
