//! HTTP entry points.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/auth` → login and password change
//! - `/set_course`, `/get_course`, `/clear_course` → today's active course
//! - `/mark_attendance`, `/history_by_date`, ... → the attendance ledger
//! - `/api` → reports (public)
//! - `/ws` → live dashboard feed

use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::auth::middleware::log_request;
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, course::course_routes,
    health::health_routes, reports::report_routes,
};
use crate::ws::ws_routes;

pub mod attendance;
pub mod auth;
pub mod common;
pub mod course;
pub mod health;
pub mod reports;

/// Builds the application router with its state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .merge(course_routes())
        .merge(attendance_routes())
        .nest("/api", report_routes())
        .nest("/ws", ws_routes())
        .layer(from_fn(log_request))
        .with_state(app_state)
}
