//! Today's active course.
//!
//! - `POST /set_course` (admin)
//! - `GET /get_course` (public)
//! - `POST /clear_course` (admin)

pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;

pub fn course_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/set_course", post(post::set_course))
        .route("/clear_course", post(post::clear_course))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/get_course", get(get::get_course))
        .merge(admin)
}
