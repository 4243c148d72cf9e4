//! Standalone GLHF key verification.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Prefix every real GLHF key carries.
const KEY_PREFIX: &str = "glhf_";

#[derive(Debug, Deserialize)]
pub struct VerifyKeyRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// `POST /keys/verify`
///
/// Shape checks run first; only a plausibly-formatted key is sent to the
/// connectivity probe.
pub async fn verify_key(
    State(state): State<AppState>,
    Json(payload): Json<VerifyKeyRequest>,
) -> AppResult<Json<Value>> {
    let key = payload.api_key.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("API key is required".into()));
    }
    if !key.starts_with(KEY_PREFIX) {
        return Err(AppError::BadRequest(
            "Invalid API key format. GLHF keys start with 'glhf_'".into(),
        ));
    }

    match state.backend.probe(key).await {
        Ok(()) => Ok(Json(json!({ "valid": true }))),
        Err(err) => {
            tracing::debug!(error = %err, "API key verification failed");
            let status = err.status().unwrap_or(500);
            let message = if status == 401 {
                "Invalid API key".to_string()
            } else {
                "Unable to verify API key".to_string()
            };
            Err(AppError::Upstream { status, message })
        }
    }
}
