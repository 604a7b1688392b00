use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{body_json, get, make_test_app, post_json};

#[tokio::test]
async fn get_course_defaults_to_general() {
    let app = make_test_app().await;

    let response = app.send(get("/get_course", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["active"], false);
    assert_eq!(json["mode"], "general");
    assert_eq!(json["course"], "");
}

#[tokio::test]
async fn admin_sets_and_clears_course() {
    let app = make_test_app().await;
    let token = app.admin_token.clone();

    let response = app
        .send(post_json(
            "/set_course",
            Some(&token),
            json!({ "course": "CS101", "mode": "course" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Course and mode updated", "course": "CS101", "mode": "course" })
    );

    let json = body_json(app.send(get("/get_course", None)).await).await;
    assert_eq!(json["active"], true);
    assert_eq!(json["course"], "CS101");
    assert_eq!(json["mode"], "course");
    assert!(json["course_id"].is_i64());

    let response = app
        .send(post_json("/clear_course", Some(&token), json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Session cleared (no active course)"
    );

    let json = body_json(app.send(get("/get_course", None)).await).await;
    assert_eq!(json["active"], false);
}

#[tokio::test]
async fn latest_course_wins() {
    let app = make_test_app().await;
    let token = app.admin_token.clone();

    for course in ["CS101", "MA201", "CS101"] {
        let response = app
            .send(post_json(
                "/set_course",
                Some(&token),
                json!({ "course": course, "mode": "course" }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(app.send(get("/get_course", None)).await).await;
    assert_eq!(json["course"], "CS101");
}

#[tokio::test]
async fn course_mode_without_course_is_rejected() {
    let app = make_test_app().await;

    let response = app
        .send(post_json(
            "/set_course",
            Some(&app.admin_token),
            json!({ "course": "  ", "mode": "course" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Course required for course mode");
}

#[tokio::test]
async fn unknown_mode_is_rejected() {
    let app = make_test_app().await;

    let response = app
        .send(post_json(
            "/set_course",
            Some(&app.admin_token),
            json!({ "course": "CS101", "mode": "lecture" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn set_course_requires_admin() {
    let app = make_test_app().await;

    let body = json!({ "course": "CS101", "mode": "course" });

    let response = app.send(post_json("/set_course", None, body.clone())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(post_json("/set_course", Some(&app.student_token), body))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["message"], "Admin access required");

    let json = body_json(app.send(get("/get_course", None)).await).await;
    assert_eq!(json["active"], false);
}
