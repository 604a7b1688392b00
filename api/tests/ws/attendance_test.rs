use futures_util::SinkExt;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use crate::helpers::{connect_ws, make_test_app, next_event, post_json, spawn_server, today};

#[tokio::test]
async fn dashboard_receives_attendance_events() {
    let app = make_test_app().await;
    let admin = app.admin_token.clone();
    let addr = spawn_server(app.app.clone()).await;

    let (mut client, _) = connect_ws(&addr.to_string(), "attendance", &admin)
        .await
        .expect("websocket handshake");
    // Let the server subscribe before anything is published.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    app.send(post_json(
        "/set_course",
        Some(&admin),
        json!({ "course": "CS101", "mode": "course" }),
    ))
    .await;

    let event = next_event(&mut client).await;
    assert_eq!(event["event"], "course_changed");
    assert_eq!(event["topic"], "attendance");
    assert_eq!(event["payload"]["course"], "CS101");
    assert_eq!(event["payload"]["mode"], "course");

    app.send(post_json("/mark_attendance", None, json!({ "data": "S1|Ada" })))
        .await;

    let general = next_event(&mut client).await;
    assert_eq!(general["event"], "new_attendance");
    assert_eq!(general["payload"]["Course"], "General");

    let course = next_event(&mut client).await;
    assert_eq!(course["event"], "new_attendance");
    assert_eq!(course["payload"]["Course"], "CS101");

    let count = next_event(&mut client).await;
    assert_eq!(count["event"], "attendance_count");
    assert_eq!(count["payload"], json!({ "course": "CS101", "count": 1, "date": today() }));
}

#[tokio::test]
async fn app_ping_gets_pong() {
    let app = make_test_app().await;
    let addr = spawn_server(app.app.clone()).await;

    let (mut client, _) = connect_ws(&addr.to_string(), "attendance", &app.student_token)
        .await
        .expect("websocket handshake");

    client
        .send(Message::Text(r#"{"type":"ping"}"#.into()))
        .await
        .unwrap();

    let pong = next_event(&mut client).await;
    assert_eq!(pong["event"], "pong");
    assert_eq!(pong["topic"], "attendance");
}

#[tokio::test]
async fn connection_without_token_is_refused() {
    let app = make_test_app().await;
    let addr = spawn_server(app.app.clone()).await;

    assert!(connect_ws(&addr.to_string(), "attendance", "").await.is_err());
}
