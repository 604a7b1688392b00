use axum::{Json, extract::State};
use services::active_session::{ActiveSession, ActiveSessionService};
use util::{clock, state::AppState};

use crate::response::ApiResult;
use crate::routes::common::local_now;

/// GET /get_course
///
/// ```json
/// { "active": true, "course": "CS101", "mode": "course", "course_id": 3 }
/// ```
///
/// With nothing active today: `{ "active": false, "course": "", "mode": "general", "course_id": null }`.
pub async fn get_course(State(state): State<AppState>) -> ApiResult<Json<ActiveSession>> {
    let today = clock::date_string(&local_now());
    let session = ActiveSessionService::get_active(state.db(), &today).await?;
    Ok(Json(session))
}
