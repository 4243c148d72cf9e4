use std::sync::Arc;

use glhfchat_core::crypto::ApiKeyCipher;
use glhfchat_llm::CompletionBackend;

use crate::config::ServerConfig;
use crate::relay::ChatRelay;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: glhfchat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential codec, built once from the configured passphrase and
    /// read-only afterwards.
    pub cipher: Arc<ApiKeyCipher>,
    /// Completion service used by the key-verification endpoint.
    pub backend: Arc<dyn CompletionBackend>,
    /// Chat relay service.
    pub relay: Arc<ChatRelay>,
}
