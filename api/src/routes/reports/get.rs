use axum::{
    Json,
    extract::{Path, State},
};
use services::reports::{CourseAverage, ReportService, StudentCoursePerformance, StudentReport};
use util::{config, state::AppState};

use crate::response::ApiResult;

/// GET /api/performance
///
/// One row per student and course attended.
pub async fn performance(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<StudentCoursePerformance>>> {
    let rows =
        ReportService::performance(state.db(), config::eligibility_threshold_percent()).await?;
    Ok(Json(rows))
}

/// GET /api/course_average
pub async fn course_average(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseAverage>>> {
    Ok(Json(ReportService::course_averages(state.db()).await?))
}

/// GET /api/student_performance/{matric}
///
/// `404` when the student has never been recorded.
pub async fn student_performance(
    State(state): State<AppState>,
    Path(matric): Path<String>,
) -> ApiResult<Json<StudentReport>> {
    let report =
        ReportService::student(state.db(), &matric, config::eligibility_threshold_percent())
            .await?;
    Ok(Json(report))
}
