//! HTTP-level integration tests for chat threads and messages, with a
//! focus on ownership scoping and first-message title derivation.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get_auth, post_json_auth, register_user,
};
use sqlx::PgPool;

async fn create_chat(pool: PgPool, token: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/chats",
        token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn new_chat_gets_default_title(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "chatter").await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/chats",
        &token,
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "New Chat");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn chat_accepts_explicit_title(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "titler").await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/chats",
        &token,
        serde_json::json!({ "title": "Rust questions" }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["title"], "Rust questions");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn chats_require_authentication(pool: PgPool) {
    let response = common::get(build_test_app(pool), "/api/v1/chats").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn chat_list_is_scoped_to_owner(pool: PgPool) {
    let (alice, _id) = register_user(build_test_app(pool.clone()), "alice").await;
    let (bob, _id) = register_user(build_test_app(pool.clone()), "bob").await;
    create_chat(pool.clone(), &alice).await;

    let response = get_auth(build_test_app(pool), "/api/v1/chats", &bob).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_chat_is_indistinguishable_from_missing(pool: PgPool) {
    let (alice, _id) = register_user(build_test_app(pool.clone()), "alice").await;
    let (bob, _id) = register_user(build_test_app(pool.clone()), "bob").await;
    let chat_id = create_chat(pool.clone(), &alice).await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}"),
        &bob,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_user_message_derives_the_title(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "writer").await;
    let chat_id = create_chat(pool.clone(), &token).await;

    let long_message = "How do I implement a doubly linked list in safe Rust?";
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/chats/{chat_id}/messages"),
        &token,
        serde_json::json!({ "role": "user", "content": long_message }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    // First 30 characters plus an ellipsis.
    assert_eq!(json["title"], "How do I implement a doubly li...");

    // A second message never retitles.
    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}/messages"),
        &token,
        serde_json::json!({ "role": "user", "content": "Another, very different question" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["title"], "How do I implement a doubly li...");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_first_message_is_used_verbatim(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "brief").await;
    let chat_id = create_chat(pool.clone(), &token).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}/messages"),
        &token,
        serde_json::json!({ "role": "user", "content": "Hello there" }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["title"], "Hello there");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assistant_first_message_keeps_default_title(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "greeted").await;
    let chat_id = create_chat(pool.clone(), &token).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}/messages"),
        &token,
        serde_json::json!({ "role": "assistant", "content": "Welcome! How can I help?" }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["title"], "New Chat");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_role_is_rejected(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "roleless").await;
    let chat_id = create_chat(pool.clone(), &token).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}/messages"),
        &token,
        serde_json::json!({ "role": "system", "content": "sneaky" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn chat_returns_messages_in_insertion_order(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "reader").await;
    let chat_id = create_chat(pool.clone(), &token).await;

    for (role, content) in [("user", "first"), ("assistant", "second"), ("user", "third")] {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            &format!("/api/v1/chats/{chat_id}/messages"),
            &token,
            serde_json::json!({ "role": role, "content": content }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["content"], "first");
    assert_eq!(messages[1]["content"], "second");
    assert_eq!(messages[2]["content"], "third");
    assert!(messages[0]["timestamp"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleted_chat_is_gone(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "cleaner").await;
    let chat_id = create_chat(pool.clone(), &token).await;

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/chats/{chat_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/chats/{chat_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
