use axum::http::StatusCode;

use crate::helpers::{body_json, get, make_test_app};

#[tokio::test]
async fn health_check_is_public() {
    let app = make_test_app().await;

    let response = app.send(get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = make_test_app().await;
    let response = app.send(get("/nope", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
