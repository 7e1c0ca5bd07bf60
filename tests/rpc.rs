mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{FailingUserRepository, InMemoryUserRepository, PanickingUserRepository, UNKNOWN_ID};

const CREATE_USER: &str = "/user.v1.UserService/CreateUser";
const GET_USER: &str = "/user.v1.UserService/GetUser";

#[tokio::test]
async fn test_methods_require_token() {
    let server = common::rpc_server(common::create_test_state(InMemoryUserRepository::new()));

    let response = server
        .post(CREATE_USER)
        .json(&json!({ "name": "John", "email": "john@example.com", "password": "password123" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let json: Value = response.json();
    assert_eq!(json["code"], "4006");

    let response = server
        .post(GET_USER)
        .add_header("Authorization", "Bearer garbage")
        .json(&json!({ "id": UNKNOWN_ID }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_is_ignored() {
    let server = common::rpc_server(common::create_test_state(InMemoryUserRepository::new()));
    let token = common::token_for("admin@example.com");

    let response = server
        .post(GET_USER)
        .add_header("Cookie", format!("token={}", token))
        .json(&json!({ "id": UNKNOWN_ID }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_then_get_user() {
    let server = common::rpc_server(common::create_test_state(InMemoryUserRepository::new()));
    let token = common::token_for("admin@example.com");

    let response = server
        .post(CREATE_USER)
        .add_header("Authorization", format!("bearer {}", token))
        .json(&json!({ "name": "John Doe", "email": "john@example.com", "password": "password123" }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "0000");
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .post(GET_USER)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "id": id }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "0000");
    assert_eq!(
        json["data"],
        json!({ "id": id, "name": "John Doe", "email": "john@example.com" })
    );
}

#[tokio::test]
async fn test_failures_are_envelopes_with_ok_status() {
    let server = common::rpc_server(common::create_test_state(InMemoryUserRepository::new()));
    let token = common::token_for("admin@example.com");

    let cases = [
        (
            CREATE_USER,
            json!({ "email": "john@example.com", "password": "password123" }),
            "4001",
            "name is required",
        ),
        (
            CREATE_USER,
            json!({ "name": "John", "email": "nope", "password": "password123" }),
            "4004",
            "email is invalid data",
        ),
        (CREATE_USER, json!({ "name": 1 }), "4000", "Unexpected request"),
        (GET_USER, json!({ "id": "12345" }), "4004", "id is invalid data"),
        (GET_USER, json!({ "id": UNKNOWN_ID }), "4005", "User not found"),
    ];

    for (method, body, code, message) in cases {
        let response = server
            .post(method)
            .add_header("Authorization", common::bearer(&token))
            .json(&body)
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["code"], code, "{} {}", method, body);
        assert_eq!(json["message"], message);
        assert!(json.get("data").is_none());
    }
}

#[tokio::test]
async fn test_duplicate_email() {
    let server = common::rpc_server(common::create_test_state(InMemoryUserRepository::new()));
    let token = common::token_for("admin@example.com");
    let body = json!({ "name": "John", "email": "john@example.com", "password": "password123" });

    server
        .post(CREATE_USER)
        .add_header("Authorization", common::bearer(&token))
        .json(&body)
        .await
        .assert_status_ok();

    let response = server
        .post(CREATE_USER)
        .add_header("Authorization", common::bearer(&token))
        .json(&body)
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "4002");
}

#[tokio::test]
async fn test_store_failure_is_internal_envelope() {
    let server = common::rpc_server(common::create_test_state(FailingUserRepository));
    let token = common::token_for("admin@example.com");

    let response = server
        .post(GET_USER)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "id": UNKNOWN_ID }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "5000");
    assert_eq!(json["message"], "Internal server error");

    let response = server
        .post(CREATE_USER)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "John", "email": "john@example.com", "password": "password123" }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "5000");
}

#[tokio::test]
async fn test_handler_panic_is_internal_envelope() {
    let server = common::rpc_server(common::create_test_state(PanickingUserRepository));
    let token = common::token_for("admin@example.com");

    let response = server
        .post(GET_USER)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "id": UNKNOWN_ID }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "5000");
    assert_eq!(json["message"], "Internal server error");
}
