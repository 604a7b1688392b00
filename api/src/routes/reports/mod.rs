//! Read-only attendance reports under `/api`.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

/// - `GET /api/performance`
/// - `GET /api/course_average`
/// - `GET /api/student_performance/{matric}`
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/performance", get(get::performance))
        .route("/course_average", get(get::course_average))
        .route("/student_performance/{matric}", get(get::student_performance))
}
