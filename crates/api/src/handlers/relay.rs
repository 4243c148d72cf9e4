//! The chat relay endpoint: usable anonymously or with a session.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use glhfchat_core::error::CoreError;
use glhfchat_core::offline;
use glhfchat_core::types::DbId;
use glhfchat_db::repositories::{OfflineResponseRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::relay::{ChatRelayRequest, ChatRelayResponse, RelayReply};
use crate::state::AppState;

/// Latency applied when offline mode is forced by the user's flag; the
/// relay applies the same delay on its own offline path.
const FORCED_OFFLINE_LATENCY: Duration = Duration::from_millis(500);

/// `POST /chat`
pub async fn chat(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
    Json(payload): Json<ChatRelayRequest>,
) -> AppResult<Json<ChatRelayResponse>> {
    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".into()));
    }

    // For authenticated callers, load their stored credential and their
    // offline preference.
    let mut stored_key = None;
    let mut force_offline = false;
    let user_id = auth.as_ref().map(|a| a.user_id);
    if let Some(auth) = &auth {
        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            })?;
        force_offline = user.offline_mode;
        stored_key = UserRepo::decrypted_api_key(&state.cipher, &user);
    }

    if force_offline {
        tracing::debug!(?user_id, "Offline mode forced by user preference");
        tokio::time::sleep(FORCED_OFFLINE_LATENCY).await;
        return offline_reply(&state, user_id, &payload.message).await;
    }

    match state.relay.handle(&payload, stored_key.as_deref()).await? {
        RelayReply::Offline => offline_reply(&state, user_id, &payload.message).await,
        RelayReply::Completed {
            response,
            model,
            notice,
        } => {
            if let Some(user_id) = user_id {
                UserRepo::increment_request_count(&state.pool, user_id).await?;
            }
            Ok(Json(ChatRelayResponse {
                response,
                offline: false,
                model: Some(model),
                notice,
            }))
        }
    }
}

/// Serve an offline answer: reuse the cached answer for this query when
/// one exists, otherwise pick a canned response and cache it.
async fn offline_reply(
    state: &AppState,
    user_id: Option<DbId>,
    query: &str,
) -> AppResult<Json<ChatRelayResponse>> {
    let response = match OfflineResponseRepo::find_by_query(&state.pool, user_id, query).await? {
        Some(cached) => {
            OfflineResponseRepo::mark_used(&state.pool, cached.id).await?;
            cached.response
        }
        None => {
            let picked = offline::pick();
            OfflineResponseRepo::record(&state.pool, user_id, None, query, picked).await?;
            picked.to_string()
        }
    };

    Ok(Json(ChatRelayResponse {
        response,
        offline: true,
        model: None,
        notice: None,
    }))
}
