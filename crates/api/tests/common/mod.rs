#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use glhfchat_api::auth::jwt::JwtConfig;
use glhfchat_api::config::{GlhfConfig, ServerConfig};
use glhfchat_api::relay::ChatRelay;
use glhfchat_api::router::build_app_router;
use glhfchat_api::state::AppState;
use glhfchat_core::crypto::ApiKeyCipher;
use glhfchat_llm::messages::{Choice, ChoiceMessage};
use glhfchat_llm::{CompletionBackend, CompletionRequest, CompletionResponse, GlhfError};

/// In-process stand-in for the completion service: any non-empty key
/// probes successfully and every completion answers with a fixed string.
pub struct StubBackend;

/// The reply [`StubBackend`] gives to every completion.
pub const STUB_REPLY: &str = "stub completion reply";

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn probe(&self, api_key: &str) -> Result<(), GlhfError> {
        if api_key.is_empty() {
            return Err(GlhfError::Api {
                status: 401,
                body: "missing key".to_string(),
            });
        }
        Ok(())
    }

    async fn complete(
        &self,
        _api_key: &str,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, GlhfError> {
        Ok(CompletionResponse {
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: Some(STUB_REPLY.to_string()),
                },
            }],
        })
    }
}

/// Build a test `ServerConfig` with safe defaults and no process-wide
/// GLHF key, so unauthenticated relay requests run offline.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        encryption_key: "integration-test-encryption-key".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            token_expiry_hours: 24,
        },
        glhf: GlhfConfig {
            base_url: "http://glhf.test.invalid/v1".to_string(),
            default_api_key: None,
            development: false,
        },
    }
}

/// Build the full application router against the given pool, backed by
/// [`StubBackend`].
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let cipher = Arc::new(ApiKeyCipher::new(&config.encryption_key));
    let backend: Arc<dyn CompletionBackend> = Arc::new(StubBackend);
    let relay = Arc::new(ChatRelay::new(Arc::clone(&backend), config.glhf.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        cipher,
        backend,
        relay,
    };

    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and return `(token, user_id)`.
pub async fn register_user(app: Router, username: &str) -> (String, i64) {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/v1/users/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["token"].as_str().unwrap().to_string();
    let user_id = json["user"]["id"].as_i64().unwrap();
    (token, user_id)
}
