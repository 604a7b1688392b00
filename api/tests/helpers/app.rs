use std::convert::Infallible;

use api::auth::generate_jwt;
use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    response::Response,
};
use db::models::user::Model as User;
use db::seeders::default_users::{self, ADMIN_USERNAME, STUDENT_USERNAME};
use db::test_utils::setup_test_db;
use serde_json::Value;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::{clock, config, state::AppState, ws::WebSocketManager};

pub struct TestApp {
    pub app: BoxCloneService<Request<Body>, Response, Infallible>,
    pub state: AppState,
    pub admin_token: String,
    pub student_token: String,
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.app.clone().oneshot(req).await.unwrap()
    }
}

/// Fresh in-memory database with the default users, wrapped in the full router.
pub async fn make_test_app() -> TestApp {
    let db = setup_test_db().await;
    default_users::ensure_default_users(&db)
        .await
        .expect("Failed to seed default users");

    let state = AppState::new(db, WebSocketManager::new());
    let admin_token = token_for(&state, ADMIN_USERNAME).await;
    let student_token = token_for(&state, STUDENT_USERNAME).await;

    let app = api::app(state.clone()).into_service().boxed_clone();

    TestApp {
        app,
        state,
        admin_token,
        student_token,
    }
}

async fn token_for(state: &AppState, username: &str) -> String {
    let user = User::find_by_username(state.db(), username)
        .await
        .unwrap()
        .expect("default user missing");
    generate_jwt(user.id, &user.username, user.is_admin()).unwrap().0
}

/// Today's date as the server computes it.
pub fn today() -> String {
    clock::date_string(&clock::local_now(config::timezone_offset_minutes()))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    req.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    req.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
