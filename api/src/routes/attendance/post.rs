use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::not_blank;
use serde::{Deserialize, Serialize};
use services::AppError;
use services::attendance_ledger::AttendanceLedgerService;
use services::attendance_marking::{AttendanceMarkingService, MarkOutcome};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiError, ApiResult, MessageResponse};
use crate::routes::common::{local_now, validate};
use crate::ws::WsNotifier;

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    /// Raw QR text, `"<studentId>|<name>"`.
    #[serde(default)]
    pub data: String,
}

/// POST /mark_attendance
///
/// ### Request Body
/// ```json
/// { "data": "S100|Jane Doe" }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "messages": ["✅ General attendance recorded."],
///   "inserted": [{ "ID": "S100", "Name": "Jane Doe", "Date": "2024-03-01", "Time": "09:15:02", "Course": "General" }]
/// }
/// ```
/// - `400 Bad Request` in the same shape with `success: false` for a malformed payload
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(req): Json<MarkAttendanceRequest>,
) -> Response {
    let notifier = WsNotifier::new(state.ws_clone());

    match AttendanceMarkingService::mark(state.db(), &notifier, &req.data, local_now()).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(AppError::Validation(message)) => (
            StatusCode::BAD_REQUEST,
            Json(MarkOutcome {
                success: false,
                messages: vec![message],
                inserted: Vec::new(),
            }),
        )
            .into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRecordRequest {
    #[serde(rename = "ID", default)]
    #[validate(custom(function = "not_blank"))]
    pub id: String,

    #[serde(rename = "Date", default)]
    #[validate(custom(function = "not_blank"))]
    pub date: String,

    #[serde(rename = "Time", default)]
    #[validate(custom(function = "not_blank"))]
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteRecordResponse {
    pub success: bool,
}

/// POST /delete_record
///
/// Removes the record identified by student id, date and time. `success` is
/// `false` when nothing matched.
pub async fn delete_record(
    State(state): State<AppState>,
    Json(req): Json<DeleteRecordRequest>,
) -> ApiResult<Json<DeleteRecordResponse>> {
    validate(&req)?;

    let success =
        AttendanceLedgerService::delete_record(state.db(), &req.id, req.date.trim(), req.time.trim())
            .await?;

    Ok(Json(DeleteRecordResponse { success }))
}

/// POST /delete_history
///
/// Wipes every attendance record.
pub async fn delete_history(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let message = AttendanceLedgerService::delete_history(state.db()).await?;
    Ok(Json(MessageResponse::new(message)))
}
