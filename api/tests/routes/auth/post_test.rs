use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{body_json, get, make_test_app, post_json};

#[tokio::test]
async fn login_with_default_admin() {
    let app = make_test_app().await;

    let response = app
        .send(post_json(
            "/auth/login",
            None,
            json!({ "username": "admin", "password": "admin123" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["data"]["username"], "admin");
    assert_eq!(json["data"]["role"], "admin");

    // The issued token opens admin routes.
    let token = json["data"]["token"].as_str().unwrap();
    let response = app
        .send(post_json("/clear_course", Some(token), json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let app = make_test_app().await;

    let response = app
        .send(post_json(
            "/auth/login",
            None,
            json!({ "username": "admin", "password": "wrong" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid username or password");
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = make_test_app().await;

    let response = app
        .send(post_json("/auth/login", None, json!({ "username": "admin" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Password is required");
}

#[tokio::test]
async fn change_password_flow() {
    let app = make_test_app().await;
    let token = app.student_token.clone();

    let response = app
        .send(post_json(
            "/auth/change_password",
            Some(&token),
            json!({ "current_password": "nope", "new_password": "a", "confirm_password": "a" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "❌ Current password is incorrect."
    );

    let response = app
        .send(post_json(
            "/auth/change_password",
            Some(&token),
            json!({ "current_password": "student123", "new_password": "a", "confirm_password": "b" }),
        ))
        .await;
    assert_eq!(body_json(response).await["message"], "⚠️ Passwords do not match.");

    let response = app
        .send(post_json(
            "/auth/change_password",
            Some(&token),
            json!({ "current_password": "student123", "new_password": "n3w", "confirm_password": "n3w" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "✅ Password changed successfully."
    );

    let response = app
        .send(post_json(
            "/auth/login",
            None,
            json!({ "username": "student", "password": "n3w" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn change_password_requires_session() {
    let app = make_test_app().await;
    let response = app
        .send(post_json("/auth/change_password", None, json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = make_test_app().await;

    let response = app.send(get("/history_by_date", Some("not-a-jwt"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Authentication required");
}
