//! Model catalog endpoint.

use axum::Json;
use glhfchat_core::registry;
use serde_json::{json, Value};

/// `GET /models`
///
/// The catalog is static; no upstream call is made.
pub async fn list_models() -> Json<Value> {
    Json(json!({
        "models": registry::all(),
        "default": registry::DEFAULT_MODEL,
    }))
}
