//! Live dashboard feed over websockets.

pub mod attendance;
pub mod notifier;

pub use notifier::WsNotifier;

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

/// - `GET /ws/attendance` → every attendance event (any session)
pub fn ws_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(attendance::attendance_ws_handler))
        .route_layer(from_fn(allow_authenticated))
}
