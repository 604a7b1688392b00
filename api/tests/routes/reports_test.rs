use axum::http::StatusCode;
use db::models::attendance_record::{Model as AttendanceRecord, NewRecord};
use serde_json::json;
use serial_test::serial;
use util::config::AppConfig;

use crate::helpers::{TestApp, body_json, get, make_test_app};

async fn record(app: &TestApp, id: &str, name: &str, date: &str, course: &str) {
    AttendanceRecord::insert_if_absent(
        app.state.db(),
        NewRecord {
            student_id: id,
            name,
            date,
            time: "09:00:00",
            course,
        },
    )
    .await
    .unwrap();
}

/// CS101 met on two days; S1 came to both, S2 to one.
async fn seed(app: &TestApp) {
    record(app, "S1", "Ada", "2024-03-01", "CS101").await;
    record(app, "S1", "Ada", "2024-03-02", "CS101").await;
    record(app, "S2", "Bo", "2024-03-01", "CS101").await;
}

#[tokio::test]
#[serial]
async fn performance_lists_each_student_course_pair() {
    let app = make_test_app().await;
    seed(&app).await;

    let response = app.send(get("/api/performance", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = body_json(response).await;
    assert_eq!(
        rows,
        json!([
            {
                "student_id": "S1", "name": "Ada", "course": "CS101",
                "attended": 2, "total_classes": 2, "attendance_percent": 100.0, "eligible": true
            },
            {
                "student_id": "S2", "name": "Bo", "course": "CS101",
                "attended": 1, "total_classes": 2, "attendance_percent": 50.0, "eligible": false
            }
        ])
    );
}

#[tokio::test]
#[serial]
async fn course_average() {
    let app = make_test_app().await;
    seed(&app).await;

    let rows = body_json(app.send(get("/api/course_average", None)).await).await;
    assert_eq!(
        rows,
        json!([{ "course": "CS101", "total_classes": 2, "avg_attendance": 75.0 }])
    );
}

#[tokio::test]
#[serial]
async fn student_performance() {
    let app = make_test_app().await;
    seed(&app).await;

    let response = app.send(get("/api/student_performance/s2", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["matric"], "S2");
    assert_eq!(json["name"], "Bo");
    assert_eq!(json["overall_percent"], 50.0);
    assert_eq!(json["eligible"], false);
    assert_eq!(json["courses"][0]["attended"], 1);

    let response = app.send(get("/api/student_performance/S9", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        "No attendance record found for this matric number."
    );
}

#[tokio::test]
#[serial]
async fn empty_ledger_gives_empty_reports() {
    let app = make_test_app().await;
    assert_eq!(body_json(app.send(get("/api/performance", None)).await).await, json!([]));
    assert_eq!(body_json(app.send(get("/api/course_average", None)).await).await, json!([]));
}

#[tokio::test]
#[serial]
async fn eligibility_threshold_comes_from_config() {
    let app = make_test_app().await;
    seed(&app).await;

    AppConfig::set_eligibility_threshold_percent(50.0);
    let rows = body_json(app.send(get("/api/performance", None)).await).await;
    AppConfig::reset();

    assert_eq!(rows[1]["student_id"], "S2");
    assert_eq!(rows[1]["eligible"], true);
}
