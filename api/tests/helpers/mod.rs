#![allow(dead_code, unused_imports)]

pub mod app;
pub mod ws;

pub use app::{TestApp, body_json, get, make_test_app, post_json, today};
pub use ws::{connect_ws, next_event, spawn_server};
