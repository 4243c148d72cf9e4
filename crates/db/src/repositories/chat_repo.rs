//! Repository for chat threads and their messages.
//!
//! All lookups are ownership-scoped: a chat that exists but belongs to a
//! different user is indistinguishable from one that does not exist.

use glhfchat_core::chat::{derive_title, DEFAULT_CHAT_TITLE};
use glhfchat_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{Chat, ChatMessage};

const CHAT_COLUMNS: &str = "id, user_id, title, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, chat_id, role, content, created_at";

/// Provides CRUD operations for chats and append-only messages.
pub struct ChatRepo;

impl ChatRepo {
    /// Create a chat for a user. `title` defaults to "New Chat".
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        title: Option<&str>,
    ) -> Result<Chat, sqlx::Error> {
        let query = format!(
            "INSERT INTO chats (user_id, title) VALUES ($1, $2) RETURNING {CHAT_COLUMNS}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .bind(title.unwrap_or(DEFAULT_CHAT_TITLE))
            .fetch_one(pool)
            .await
    }

    /// List a user's chats, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Chat>, sqlx::Error> {
        let query = format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch one chat scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        chat_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Chat>(&query)
            .bind(chat_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Messages of a chat in insertion order.
    pub async fn messages(pool: &PgPool, chat_id: DbId) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(chat_id)
            .fetch_all(pool)
            .await
    }

    /// Append a message to an owned chat.
    ///
    /// Returns `None` when the chat is absent or not owned by `user_id`.
    /// When the appended message is the chat's first, its role is `user`,
    /// and the chat still carries the default title, the title is derived
    /// from the message content. The derivation happens at most once: any
    /// later append sees a non-default title and leaves it alone.
    pub async fn append_message(
        pool: &PgPool,
        chat_id: DbId,
        user_id: DbId,
        role: &str,
        content: &str,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1 AND user_id = $2 FOR UPDATE"
        );
        let chat = sqlx::query_as::<_, Chat>(&query)
            .bind(chat_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut chat) = chat else {
            return Ok(None);
        };

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE chat_id = $1")
            .bind(chat_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO messages (chat_id, role, content) VALUES ($1, $2, $3)")
            .bind(chat_id)
            .bind(role)
            .bind(content)
            .execute(&mut *tx)
            .await?;

        if existing == 0 && role == "user" && chat.title == DEFAULT_CHAT_TITLE {
            let title = derive_title(content);
            let query = format!(
                "UPDATE chats SET title = $2 WHERE id = $1 RETURNING {CHAT_COLUMNS}"
            );
            chat = sqlx::query_as::<_, Chat>(&query)
                .bind(chat_id)
                .bind(&title)
                .fetch_one(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(chat))
    }

    /// Delete an owned chat (messages cascade). Returns `true` if a row
    /// was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        chat_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1 AND user_id = $2")
            .bind(chat_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
