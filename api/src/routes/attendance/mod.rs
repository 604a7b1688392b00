//! Scanning, history and export.

pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};

/// - `POST /mark_attendance` → `mark_attendance` (public; scanner devices)
/// - `GET /my_attendance` → `my_attendance` (public)
/// - `GET /history_by_date` → `history_by_date` (any session)
/// - `GET /download_by_date` → `download_by_date` (any session)
/// - `POST /delete_record` → `delete_record` (any session)
/// - `POST /delete_history` → `delete_history` (admin)
pub fn attendance_routes() -> Router<AppState> {
    let session = Router::new()
        .route("/history_by_date", get(get::history_by_date))
        .route("/download_by_date", get(get::download_by_date))
        .route("/delete_record", post(post::delete_record))
        .route_layer(from_fn(allow_authenticated));

    let admin = Router::new()
        .route("/delete_history", post(post::delete_history))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/mark_attendance", post(post::mark_attendance))
        .route("/my_attendance", get(get::my_attendance))
        .merge(session)
        .merge(admin)
}
