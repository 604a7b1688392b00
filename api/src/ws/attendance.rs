use axum::{
    Extension,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use services::events::ATTENDANCE_TOPIC;
use util::state::AppState;
use util::ws::serve::{WsServerOptions, serve_topic};

use crate::auth::AuthUser;

/// Upgrades to a listen-only socket subscribed to the `attendance` topic.
///
/// Frames are `{"event", "topic", "payload", "ts"}` envelopes, one per
/// `course_changed`, `new_attendance` or `attendance_count` event. A text
/// frame `{"type":"ping"}` is answered with a `pong` envelope.
pub async fn attendance_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let manager = app_state.ws_clone();

    ws.on_upgrade(move |socket| async move {
        tracing::info!(user = %claims.username, "attendance dashboard connected");
        serve_topic(
            socket,
            manager,
            ATTENDANCE_TOPIC.to_owned(),
            WsServerOptions::default(),
        )
        .await;
    })
}
