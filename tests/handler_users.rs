mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use common::{FailingUserRepository, InMemoryUserRepository, PanickingUserRepository, UNKNOWN_ID};

async fn server_with_session() -> (TestServer, String) {
    let server = common::rest_server(common::create_test_state(InMemoryUserRepository::new()));
    common::register(&server, "John Doe", "john.doe@example.com", "password123").await;
    let token = common::login(&server, "john.doe@example.com", "password123").await;
    (server, token)
}

#[tokio::test]
async fn test_find_users_ordered_without_passwords() {
    let (server, token) = server_with_session().await;
    let second = common::register(&server, "Jane Roe", "jane@example.com", "secret").await;

    let response = server
        .get("/users")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "0000");

    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "john.doe@example.com");
    assert_eq!(users[1]["id"], second.as_str());
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("created_at").is_some());
    }
}

#[tokio::test]
async fn test_find_user_by_id() {
    let (server, token) = server_with_session().await;
    let id = common::register(&server, "Jane Roe", "jane@example.com", "secret").await;

    let response = server
        .get(&format!("/users/{}", id))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["id"], id.as_str());
    assert_eq!(json["data"]["name"], "Jane Roe");
    assert_eq!(json["data"]["email"], "jane@example.com");
    assert!(json["data"].get("password").is_none());
}

#[tokio::test]
async fn test_find_user_by_id_invalid_and_unknown() {
    let (server, token) = server_with_session().await;

    let response = server
        .get("/users/12345")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "4004");
    assert_eq!(json["message"], "id is invalid data");

    let response = server
        .get(&format!("/users/{}", UNKNOWN_ID))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert_eq!(json["code"], "4005");
    assert_eq!(json["message"], "User not found");
}

#[tokio::test]
async fn test_update_user_partial() {
    let (server, token) = server_with_session().await;
    let id = common::register(&server, "Jane Roe", "jane@example.com", "secret").await;

    let response = server
        .put(&format!("/users/{}", id))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Jane Doe" }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "0000");

    let json: Value = server
        .get(&format!("/users/{}", id))
        .add_header("Authorization", common::bearer(&token))
        .await
        .json();
    assert_eq!(json["data"]["name"], "Jane Doe");
    assert_eq!(json["data"]["email"], "jane@example.com");

    // Password is untouched by updates.
    common::login(&server, "jane@example.com", "secret").await;
}

#[tokio::test]
async fn test_update_user_rejections() {
    let (server, token) = server_with_session().await;
    let id = common::register(&server, "Jane Roe", "jane@example.com", "secret").await;
    let path = format!("/users/{}", id);

    let response = server
        .put(&path)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": " ", "email": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "4001");
    assert_eq!(json["message"], "name or email is required");

    let response = server
        .put(&path)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "email": "jane@" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "4004");

    let response = server
        .put(&path)
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "email": "john.doe@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "4002");

    let response = server
        .put("/users/not-an-id")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Jane" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "4004");
    assert_eq!(json["message"], "id is invalid data");

    let response = server
        .put(&format!("/users/{}", UNKNOWN_ID))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Jane" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert_eq!(json["code"], "4005");
}

#[tokio::test]
async fn test_delete_user() {
    let (server, token) = server_with_session().await;
    let id = common::register(&server, "Jane Roe", "jane@example.com", "secret").await;
    let path = format!("/users/{}", id);

    let response = server
        .delete(&path)
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["code"], "0000");

    let response = server
        .get(&path)
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .delete(&path)
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert_eq!(json["code"], "4005");

    let response = server
        .delete("/users/xyz")
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let server = common::rest_server(common::create_test_state(FailingUserRepository));
    let token = common::token_for("john.doe@example.com");

    let response = server
        .get("/users")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "5000");

    let response = server
        .delete(&format!("/users/{}", UNKNOWN_ID))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_handler_panic_is_internal_error() {
    let server = common::rest_server(common::create_test_state(PanickingUserRepository));
    let token = common::token_for("john.doe@example.com");

    let response = server
        .get("/users")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "5000");
    assert_eq!(json["message"], "Internal server error");

    // The server keeps answering after a panic.
    let response = server
        .get(&format!("/users/{}", UNKNOWN_ID))
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let response = server.get("/users").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
