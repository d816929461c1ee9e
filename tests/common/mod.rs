#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use employee_api::routes::router;
use employee_api::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";

pub fn create_test_state() -> AppState {
    AppState::in_memory(SIGNING_SECRET.to_string())
}

pub fn make_server() -> TestServer {
    make_server_with(create_test_state())
}

pub fn make_server_with(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Registers a user and returns the issued token.
pub async fn register(server: &TestServer, name: &str, email: &str) -> String {
    let response = server
        .post("/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "123456",
            "password_confirmation": "123456"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Creates an employee and returns its ID.
pub async fn create_employee(server: &TestServer, token: &str, body: Value) -> i64 {
    let response = server
        .post("/employees")
        .add_header("Authorization", bearer(token))
        .json(&body)
        .await;

    response.assert_status_ok();
    response.json::<Value>()["employee"]["id"].as_i64().unwrap()
}

pub fn bob() -> Value {
    json!({
        "name": "Bob",
        "email": "bob@x.com",
        "birth_date": "1990-01-01"
    })
}
