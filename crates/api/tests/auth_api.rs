//! HTTP-level integration tests for registration, login, and profile
//! management, including stored-key encryption behavior.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get_auth, post_json, put_json_auth, register_user,
};
use glhfchat_core::crypto::looks_encoded;
use glhfchat_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_token_and_user(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "username": "newuser",
        "email": "newuser@test.com",
        "password": "long_enough_password",
    });
    let response = post_json(app, "/api/v1/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["user"]["username"], "newuser");
    assert_eq!(json["user"]["email"], "newuser@test.com");
    assert_eq!(json["user"]["offline_mode"], false);
    assert!(
        json["user"].get("api_key").is_none(),
        "no key was supplied, so none may appear"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_stores_api_key_encrypted(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let body = serde_json::json!({
        "username": "keyuser",
        "email": "keyuser@test.com",
        "password": "long_enough_password",
        "apiKey": "glhf_secret_key_123",
    });
    let response = post_json(app, "/api/v1/users/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The API hands the plaintext back to the owner.
    let json = body_json(response).await;
    assert_eq!(json["user"]["api_key"], "glhf_secret_key_123");

    // The database row holds only the encoded form.
    let user_id = json["user"]["id"].as_i64().unwrap();
    let row = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    let stored = row.api_key.as_deref().unwrap();
    assert!(looks_encoded(stored), "stored key must be encoded");
    assert!(!stored.contains("glhf_secret_key_123"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "username": "shorty",
        "email": "shorty@test.com",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    let (_token, _id) = register_user(build_test_app(pool.clone()), "original").await;

    let body = serde_json::json!({
        "username": "different",
        "email": "original@test.com",
        "password": "long_enough_password",
    });
    let response = post_json(build_test_app(pool), "/api/v1/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Email already exists");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_conflicts(pool: PgPool) {
    let (_token, _id) = register_user(build_test_app(pool.clone()), "taken").await;

    let body = serde_json::json!({
        "username": "taken",
        "email": "other@test.com",
        "password": "long_enough_password",
    });
    let response = post_json(build_test_app(pool), "/api/v1/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Username already exists");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_succeeds_with_correct_password(pool: PgPool) {
    let (_token, user_id) = register_user(build_test_app(pool.clone()), "loginuser").await;

    let body = serde_json::json!({
        "email": "loginuser@test.com",
        "password": "test_password_123!",
    });
    let response = post_json(build_test_app(pool), "/api/v1/users/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], user_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    register_user(build_test_app(pool.clone()), "wrongpw").await;

    let body = serde_json::json!({
        "email": "wrongpw@test.com",
        "password": "not_the_password",
    });
    let response = post_json(build_test_app(pool), "/api/v1/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "email": "ghost@test.com",
        "password": "whatever_password",
    });
    let response = post_json(app, "/api/v1/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool);

    let response = common::get(app, "/api/v1/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_round_trip(pool: PgPool) {
    let (token, user_id) = register_user(build_test_app(pool.clone()), "profiled").await;

    let response = get_auth(build_test_app(pool), "/api/v1/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user_id);
    assert_eq!(json["username"], "profiled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_update_changes_username(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "oldname").await;

    let body = serde_json::json!({ "username": "newname" });
    let response = put_json_auth(build_test_app(pool), "/api/v1/users/me", &token, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newname");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn api_key_update_and_clear(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "keyed").await;

    let body = serde_json::json!({ "apiKey": "glhf_fresh_key" });
    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/users/me/api-key",
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["api_key"], "glhf_fresh_key");

    // An empty replacement clears the stored key.
    let body = serde_json::json!({ "apiKey": "" });
    let response = put_json_auth(build_test_app(pool), "/api/v1/users/me/api-key", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.get("api_key").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn offline_mode_toggle(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "offliner").await;

    let body = serde_json::json!({ "offline_mode": true });
    let response = put_json_auth(
        build_test_app(pool),
        "/api/v1/users/me/offline-mode",
        &token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["offline_mode"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleted_account_cannot_login(pool: PgPool) {
    let (token, _id) = register_user(build_test_app(pool.clone()), "leaver").await;

    let response = delete_auth(build_test_app(pool.clone()), "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({
        "email": "leaver@test.com",
        "password": "test_password_123!",
    });
    let response = post_json(build_test_app(pool), "/api/v1/users/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
