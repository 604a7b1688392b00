use axum::{Json, extract::State};
use serde::Deserialize;
use services::active_session::{ActiveSessionService, Mode, SessionChange};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResult, MessageResponse};
use crate::routes::common::{local_now, validate};
use crate::ws::WsNotifier;

#[derive(Debug, Deserialize, Validate)]
pub struct SetCourseRequest {
    #[serde(default)]
    #[validate(length(max = 120, message = "Course name is too long"))]
    pub course: String,
    /// `"general"` or `"course"`; missing means general.
    #[serde(default)]
    pub mode: Option<String>,
}

/// POST /set_course
///
/// ### Request Body
/// ```json
/// { "course": "CS101", "mode": "course" }
/// ```
///
/// ### Responses
/// - `200 OK` `{ "message": "Course and mode updated", "course": "CS101", "mode": "course" }`
/// - `400 Bad Request` for course mode without a course, or an unknown mode
pub async fn set_course(
    State(state): State<AppState>,
    Json(req): Json<SetCourseRequest>,
) -> ApiResult<Json<SessionChange>> {
    validate(&req)?;
    let mode = Mode::parse_opt(req.mode.as_deref())?;

    let notifier = WsNotifier::new(state.ws_clone());
    let change =
        ActiveSessionService::set_course(state.db(), &notifier, &req.course, mode, local_now())
            .await?;

    Ok(Json(change))
}

/// POST /clear_course
///
/// Puts today back into general mode.
pub async fn clear_course(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let notifier = WsNotifier::new(state.ws_clone());
    let message = ActiveSessionService::clear(state.db(), &notifier, local_now()).await?;
    Ok(Json(MessageResponse::new(message)))
}
