//! Chat thread and message models.

use glhfchat_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A chat thread row. Owned by exactly one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A single message in a chat. Immutable once appended.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub chat_id: DbId,
    /// Either `"user"` or `"assistant"` (enforced by a check constraint).
    pub role: String,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}

/// A chat thread with its ordered message list, as returned by the API.
#[derive(Debug, Serialize)]
pub struct ChatWithMessages {
    #[serde(flatten)]
    pub chat: Chat,
    pub messages: Vec<ChatMessage>,
}
