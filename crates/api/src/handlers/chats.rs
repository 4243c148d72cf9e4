//! Chat thread and message endpoints. All of them require a session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use glhfchat_core::error::CoreError;
use glhfchat_core::types::DbId;
use glhfchat_db::models::chat::{Chat, ChatWithMessages};
use glhfchat_db::repositories::ChatRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: String,
    pub content: String,
}

fn not_found(chat_id: DbId) -> AppError {
    CoreError::NotFound {
        entity: "Chat",
        id: chat_id,
    }
    .into()
}

/// `POST /chats`
pub async fn create_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateChatRequest>,
) -> AppResult<(StatusCode, Json<Chat>)> {
    let chat = ChatRepo::create(&state.pool, auth.user_id, payload.title.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

/// `GET /chats`
pub async fn list_chats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Chat>>> {
    let chats = ChatRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(chats))
}

/// `GET /chats/{id}`
pub async fn get_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<DbId>,
) -> AppResult<Json<ChatWithMessages>> {
    let chat = ChatRepo::find_for_user(&state.pool, chat_id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(chat_id))?;
    let messages = ChatRepo::messages(&state.pool, chat_id).await?;
    Ok(Json(ChatWithMessages { chat, messages }))
}

/// `POST /chats/{id}/messages`
///
/// Returns the chat row so callers observe a title derived from the first
/// user message without a second fetch.
pub async fn append_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<DbId>,
    Json(payload): Json<AppendMessageRequest>,
) -> AppResult<(StatusCode, Json<Chat>)> {
    if payload.role != "user" && payload.role != "assistant" {
        return Err(AppError::BadRequest(
            "Role must be 'user' or 'assistant'".into(),
        ));
    }
    if payload.content.is_empty() {
        return Err(AppError::BadRequest("Message content is required".into()));
    }

    let chat = ChatRepo::append_message(
        &state.pool,
        chat_id,
        auth.user_id,
        &payload.role,
        &payload.content,
    )
    .await?
    .ok_or_else(|| not_found(chat_id))?;

    Ok((StatusCode::CREATED, Json(chat)))
}

/// `DELETE /chats/{id}`
pub async fn delete_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ChatRepo::delete_for_user(&state.pool, chat_id, auth.user_id).await?;
    if !deleted {
        return Err(not_found(chat_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
