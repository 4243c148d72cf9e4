//! Cached offline answers keyed by normalized query.

use glhfchat_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One cached offline answer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfflineResponse {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub chat_id: Option<DbId>,
    /// Normalized (trimmed, lowercased) query text.
    pub query: String,
    pub response: String,
    pub used: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
