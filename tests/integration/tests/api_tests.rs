//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use chat_core::traits::{MessageQuery, RoomRepository};
use chat_core::{RecordId, RoomEvent};
use chat_db::{create_pool, DatabaseConfig, PgRoomRepository};
use futures_util::StreamExt;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();
    let response = session.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();
    let response = session.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_provisions_then_reuses_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();
    let request = LoginRequest::unique();

    let response = session.post("/api/v1/auth/login", &request).await.unwrap();
    assert!(response
        .headers()
        .get_all("set-cookie")
        .iter()
        .any(|v| v.to_str().unwrap_or("").starts_with("chat_session=")));
    let first: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first["success"], true);
    assert_eq!(first["user"]["username"], request.username.as_str());
    assert!(first["user"]["avatar_url"]
        .as_str()
        .unwrap()
        .ends_with(&format!("seed={}", request.username)));

    // Same username, different email
    let other = server.session().unwrap();
    let by_name = json!({ "username": request.username, "email": "someone-else@example.com" });
    let response = other.post("/api/v1/auth/login", &by_name).await.unwrap();
    let second: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second["user"]["id"], first["user"]["id"]);
}

#[tokio::test]
async fn test_current_user_and_logout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();

    let response = session.get("/api/v1/users/@me").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, Value::Null);

    let request = LoginRequest::unique();
    session.post("/api/v1/auth/login", &request).await.unwrap();

    let response = session.get("/api/v1/users/@me").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["email"], request.email.as_str());

    let response = session.post("/api/v1/auth/logout", &json!({})).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let response = session.get("/api/v1/users/@me").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, Value::Null);
}

// ============================================================================
// Room & Message Tests
// ============================================================================

#[tokio::test]
async fn test_create_room_records_single_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();
    let login: Value = assert_json(
        session.post("/api/v1/auth/login", &LoginRequest::unique()).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    let response = session.post("/api/v1/rooms", &unique_room()).await.unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let room_id = RecordId::new(body["room"]["id"].as_i64().unwrap());

    let pool = create_pool(&DatabaseConfig::from(&test_config().unwrap().database))
        .await
        .unwrap();
    let members = PgRoomRepository::new(pool).members(room_id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(
        members[0].user_id.into_inner(),
        login["user"]["id"].as_i64().unwrap()
    );
}

#[tokio::test]
async fn test_blank_room_name_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();
    session.post("/api/v1/auth/login", &LoginRequest::unique()).await.unwrap();

    let response = session.post("/api/v1/rooms", &json!({ "name": "   " })).await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_send_and_list_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.session().unwrap();
    let request = LoginRequest::unique();
    session.post("/api/v1/auth/login", &request).await.unwrap();

    let room: Value = assert_json(
        session.post("/api/v1/rooms", &unique_room()).await.unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let room_id = room["room"]["id"].as_i64().unwrap();
    let path = format!("/api/v1/rooms/{room_id}/messages");

    for i in 0..3 {
        let response = session.post(&path, &message(&format!("m{i}"))).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let page: Value = assert_json(session.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let messages = page["messages"].as_array().unwrap();
    let contents: Vec<_> = messages.iter().map(|m| m["content"].as_str().unwrap()).collect();
    assert_eq!(contents, vec!["m0", "m1", "m2"]);
    assert!(messages.iter().all(|m| m["username"] == request.username.as_str()));
    assert_eq!(page["has_more"], false);

    let page: Value = assert_json(
        session.get(&format!("{path}?limit=2")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page["messages"].as_array().unwrap().len(), 2);
    assert_eq!(page["has_more"], true);
}

#[tokio::test]
async fn test_send_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let anonymous = server.session().unwrap();

    let response = anonymous.post("/api/v1/rooms/1/messages", &message("hi")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"], "Authentication required");

    let session = server.session().unwrap();
    session.post("/api/v1/auth/login", &LoginRequest::unique()).await.unwrap();

    let response = session
        .post(&format!("/api/v1/rooms/{}/messages", i64::MAX), &message("hi"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = session.post("/api/v1/rooms/1/messages", &message(" \n ")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Client & Event Stream Tests
// ============================================================================

#[tokio::test]
async fn test_event_stream_delivers_new_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.chat_client().unwrap();
    let identity = LoginRequest::unique();
    client.login(&identity.username, &identity.email).await.unwrap();

    let room = client
        .create_room(&format!("room-{}", unique_suffix()), None)
        .await
        .unwrap();
    let mut events = client.subscribe(room.id).await.unwrap();

    let sent = client.send_message(room.id, "hello").await.unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), events.next())
        .await
        .expect("event within timeout")
        .expect("stream open")
        .unwrap();
    assert!(matches!(event, RoomEvent::MessageCreated(ref m) if m.id == sent.id));

    let page = client
        .list_messages(room.id, MessageQuery::default())
        .await
        .unwrap();
    assert_eq!(page.messages.last().map(|m| m.id), Some(sent.id));
}
