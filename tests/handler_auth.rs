mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── REGISTER ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_success() {
    let server = common::make_server();

    let response = server
        .post("/register")
        .json(&json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "123456",
            "password_confirmation": "123456"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["status"], 201);
    assert_eq!(json["user"]["id"], 1);
    assert_eq!(json["user"]["name"], "Ana");
    assert_eq!(json["user"]["email"], "ana@x.com");
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["token"].as_str().unwrap().starts_with("1|"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = common::make_server();
    common::register(&server, "Ana", "ana@x.com").await;

    let response = server
        .post("/register")
        .json(&json!({
            "name": "Other Ana",
            "email": "ana@x.com",
            "password": "abcdef",
            "password_confirmation": "abcdef"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["message"], "validation error");
    assert_eq!(json["errors"]["email"][0], "the email has already been taken");

    // The original account still logs in with its own password.
    server
        .post("/login")
        .json(&json!({ "email": "ana@x.com", "password": "123456" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_register_reports_taken_email_with_other_fields() {
    let server = common::make_server();
    common::register(&server, "Ana", "ana@x.com").await;

    let response = server
        .post("/register")
        .json(&json!({
            "email": "ana@x.com",
            "password": "abcdef",
            "password_confirmation": "abcdef"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["errors"]["name"][0], "the name field is required");
    assert_eq!(json["errors"]["email"][0], "the email has already been taken");
}

#[tokio::test]
async fn test_register_lists_every_invalid_field() {
    let server = common::make_server();

    let response = server
        .post("/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "123",
            "password_confirmation": "456"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["status"], 400);
    assert!(json["errors"]["name"].is_array());
    assert!(json["errors"]["email"].is_array());
    assert!(json["errors"]["password"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let server = common::make_server();

    let response = server.post("/register").text("{not json").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["errors"]["body"].is_array());
}

// ─── LOGIN ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_issues_new_token() {
    let server = common::make_server();
    let first = common::register(&server, "Ana", "ana@x.com").await;

    let response = server
        .post("/login")
        .json(&json!({ "email": "ana@x.com", "password": "123456" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], 200);
    assert_eq!(json["user"]["email"], "ana@x.com");
    let second = json["token"].as_str().unwrap();
    assert_ne!(second, first);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = common::make_server();
    common::register(&server, "Ana", "ana@x.com").await;

    let response = server
        .post("/login")
        .json(&json!({ "email": "ana@x.com", "password": "wrong-password" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let json = response.json::<Value>();
    assert_eq!(json["message"], "invalid credentials");
    assert_eq!(json["status"], 401);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let server = common::make_server();

    let response = server
        .post("/login")
        .json(&json!({ "email": "ghost@x.com", "password": "123456" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], "invalid credentials");
}

#[tokio::test]
async fn test_login_validation() {
    let server = common::make_server();

    let response = server
        .post("/login")
        .json(&json!({ "email": "nope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert!(json["errors"]["email"].is_array());
    assert!(json["errors"]["password"].is_array());
}

// ─── LOGOUT ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logout_revokes_every_token() {
    let server = common::make_server();
    let first = common::register(&server, "Ana", "ana@x.com").await;

    let second = server
        .post("/login")
        .json(&json!({ "email": "ana@x.com", "password": "123456" }))
        .await
        .json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .post("/logout")
        .add_header("Authorization", common::bearer(&first))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], 200);
    assert!(json["message"].is_string());

    for token in [&first, &second] {
        server
            .get("/employees")
            .add_header("Authorization", common::bearer(token))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_logout_only_affects_caller() {
    let server = common::make_server();
    let ana = common::register(&server, "Ana", "ana@x.com").await;
    let carl = common::register(&server, "Carl", "carl@x.com").await;

    server
        .post("/logout")
        .add_header("Authorization", common::bearer(&ana))
        .await
        .assert_status_ok();

    server
        .post("/employees")
        .add_header("Authorization", common::bearer(&carl))
        .json(&common::bob())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_logout_without_token() {
    let server = common::make_server();

    let response = server.post("/logout").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.header("www-authenticate").to_str().unwrap(),
        "Bearer"
    );
    assert_eq!(response.json::<Value>()["message"], "Unauthenticated.");
}
