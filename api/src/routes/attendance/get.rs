use axum::{
    Json,
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use db::models::attendance_record::{Model as AttendanceRecord, RecordFilter};
use serde::Deserialize;
use services::attendance_ledger::AttendanceLedgerService;
use util::state::AppState;

use crate::response::ApiResult;

/// `?date=YYYY-MM-DD&course=...`; blank values mean "any".
#[derive(Debug, Deserialize, Default)]
pub struct SelectionQuery {
    pub date: Option<String>,
    pub course: Option<String>,
}

impl From<SelectionQuery> for RecordFilter {
    fn from(q: SelectionQuery) -> Self {
        RecordFilter::new(q.date, q.course)
    }
}

/// GET /history_by_date
///
/// Records matching the selection, newest first.
pub async fn history_by_date(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let filter = RecordFilter::from(query);
    let rows = AttendanceLedgerService::history(state.db(), &filter).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct MyAttendanceQuery {
    #[serde(default)]
    pub id: String,
}

/// GET /my_attendance?id=
///
/// Every record of one student, newest first. Student ids match
/// case-insensitively; a missing id returns `[]`.
pub async fn my_attendance(
    State(state): State<AppState>,
    Query(query): Query<MyAttendanceQuery>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let rows = AttendanceLedgerService::for_student(state.db(), &query.id).await?;
    Ok(Json(rows))
}

/// GET /download_by_date
///
/// The selection as a CSV attachment, oldest first.
///
/// ### Responses
/// - `200 OK` with `Content-Disposition: attachment; filename="attendance_<date>_<course>.csv"`
/// - `404 Not Found` `"No data for selection"`
pub async fn download_by_date(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = RecordFilter::from(query);
    let export = AttendanceLedgerService::export_csv(state.db(), &filter).await?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.body,
    ))
}
