use axum::{
    body::to_bytes,
    http::{StatusCode, header},
};
use serde_json::{Value, json};

use crate::helpers::{TestApp, body_json, get, make_test_app, post_json, today};

async fn scan(app: &TestApp, data: &str) -> (StatusCode, Value) {
    let response = app
        .send(post_json("/mark_attendance", None, json!({ "data": data })))
        .await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn activate(app: &TestApp, course: &str) {
    let response = app
        .send(post_json(
            "/set_course",
            Some(&app.admin_token),
            json!({ "course": course, "mode": "course" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn general_scan_records_once() {
    let app = make_test_app().await;

    let (status, json) = scan(&app, "S100|Jane Doe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["messages"], json!(["✅ General attendance recorded."]));

    let row = &json["inserted"][0];
    assert_eq!(row["ID"], "S100");
    assert_eq!(row["Name"], "Jane Doe");
    assert_eq!(row["Date"], today());
    assert_eq!(row["Course"], "General");

    let (_, json) = scan(&app, "S100|Jane Doe").await;
    assert_eq!(
        json["messages"],
        json!(["⚠️ General attendance already recorded today."])
    );
    assert_eq!(json["inserted"], json!([]));
}

#[tokio::test]
async fn course_scan_records_general_and_course() {
    let app = make_test_app().await;
    activate(&app, "CS101").await;

    let (_, json) = scan(&app, "S100|Jane Doe").await;
    assert_eq!(
        json["messages"],
        json!([
            "✅ General attendance recorded.",
            "✅ Course attendance recorded for 'CS101'."
        ])
    );
    assert_eq!(json["inserted"].as_array().unwrap().len(), 2);

    let (_, json) = scan(&app, "s100 | Jane Doe").await;
    assert_eq!(
        json["messages"],
        json!([
            "⚠️ General attendance already recorded today.",
            "⚠️ Course attendance already recorded for 'CS101'."
        ])
    );

    // Switching course keeps the single General row.
    activate(&app, "MA201").await;
    let (_, json) = scan(&app, "S100|Jane Doe").await;
    assert_eq!(json["inserted"].as_array().unwrap().len(), 1);
    assert_eq!(json["inserted"][0]["Course"], "MA201");
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let app = make_test_app().await;

    for data in ["noSeparator", "|Jane", "S100|  ", ""] {
        let (status, json) = scan(&app, data).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{data:?}");
        assert_eq!(json["success"], false);
        assert!(json["messages"][0].as_str().unwrap().contains("Invalid QR content"));
        assert_eq!(json["inserted"], json!([]));
    }

    let rows = body_json(app.send(get("/history_by_date", Some(&app.admin_token))).await).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn concurrent_duplicate_scans_insert_one_row() {
    let app = make_test_app().await;

    let scans = (0..8).map(|_| scan(&app, "S7|Ada"));
    let results = futures_util::future::join_all(scans).await;

    let inserted: usize = results
        .iter()
        .map(|(_, json)| json["inserted"].as_array().unwrap().len())
        .sum();
    assert_eq!(inserted, 1);

    let rows = body_json(app.send(get("/my_attendance?id=s7", None)).await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn history_filters_and_requires_session() {
    let app = make_test_app().await;
    activate(&app, "CS101").await;
    scan(&app, "S1|Ada").await;
    scan(&app, "S2|Bo").await;

    let response = app.send(get("/history_by_date", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let uri = format!("/history_by_date?date={}&course=cs101", today());
    let rows = body_json(app.send(get(&uri, Some(&app.student_token))).await).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["Course"] == "CS101"));

    let rows = body_json(
        app.send(get("/history_by_date?date=1999-01-01", Some(&app.student_token)))
            .await,
    )
    .await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn my_attendance_is_public() {
    let app = make_test_app().await;
    scan(&app, "S1|Ada").await;
    scan(&app, "S2|Bo").await;

    let rows = body_json(app.send(get("/my_attendance?id=S1", None)).await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["ID"], "S1");

    let rows = body_json(app.send(get("/my_attendance", None)).await).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn delete_record_and_history() {
    let app = make_test_app().await;
    let (_, json) = scan(&app, "S1|Ada").await;
    let row = json["inserted"][0].clone();

    let body = json!({ "ID": row["ID"], "Date": row["Date"], "Time": row["Time"] });

    let response = app.send(post_json("/delete_record", None, body.clone())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(post_json("/delete_record", Some(&app.admin_token), body.clone()))
        .await;
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let response = app
        .send(post_json("/delete_record", Some(&app.admin_token), body))
        .await;
    assert_eq!(body_json(response).await, json!({ "success": false }));

    let response = app
        .send(post_json(
            "/delete_record",
            Some(&app.admin_token),
            json!({ "ID": "S1", "Date": " " }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    scan(&app, "S2|Bo").await;
    let response = app
        .send(post_json("/delete_history", Some(&app.student_token), json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(post_json("/delete_history", Some(&app.admin_token), json!({})))
        .await;
    assert_eq!(
        body_json(response).await["message"],
        "All attendance history deleted."
    );
    let rows = body_json(app.send(get("/history_by_date", Some(&app.admin_token))).await).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn download_returns_csv_attachment() {
    let app = make_test_app().await;

    let response = app
        .send(get("/download_by_date", Some(&app.admin_token)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "No data for selection");

    scan(&app, "S1|Smith, Ada").await;

    let uri = format!("/download_by_date?date={}", today());
    let response = app.send(get(&uri, Some(&app.admin_token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"attendance_{}_general.csv\"", today()).as_str()
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ID,Name,Date,Time,Course"));
    assert!(lines.next().unwrap().starts_with("S1,\"Smith, Ada\","));
    assert_eq!(lines.next(), None);
}
