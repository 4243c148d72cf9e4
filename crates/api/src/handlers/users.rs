//! Registration, login, and profile management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use glhfchat_core::crypto::ApiKeyCipher;
use glhfchat_core::error::CoreError;
use glhfchat_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use glhfchat_db::repositories::UserRepo;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    /// Optional GLHF key supplied at signup, plaintext on the wire.
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateApiKeyRequest {
    /// Replacement key; an empty string clears the stored key.
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct OfflineModeRequest {
    pub offline_mode: bool,
}

/// Build the owner-facing view of a user, key decrypted.
fn user_response(cipher: &ApiKeyCipher, user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        api_key: UserRepo::decrypted_api_key(cipher, user),
        offline_mode: user.offline_mode,
        created_at: user.created_at,
    }
}

fn auth_response(state: &AppState, user: &User) -> AppResult<Value> {
    let token = generate_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(json!({
        "token": token,
        "user": user_response(&state.cipher, user),
    }))
}

/// `POST /users/register`
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_password_strength(&payload.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let input = CreateUser {
        username: payload.username,
        email: payload.email,
        password_hash,
        api_key: payload.api_key,
    };
    let user = UserRepo::create(&state.pool, &state.cipher, &input).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

/// `POST /users/login`
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    let user = UserRepo::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(auth_response(&state, &user)?))
}

/// `GET /users/me`
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(user_response(&state.cipher, &user)))
}

/// `PUT /users/me`
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let password_hash = match &payload.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(AppError::BadRequest)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?,
            )
        }
        None => None,
    };

    let input = UpdateUser {
        username: payload.username,
        email: payload.email,
        password_hash,
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(user_response(&state.cipher, &user)))
}

/// `PUT /users/me/api-key`
pub async fn update_api_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateApiKeyRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::set_api_key(&state.pool, &state.cipher, auth.user_id, &payload.api_key)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(user_response(&state.cipher, &user)))
}

/// `PUT /users/me/offline-mode`
pub async fn set_offline_mode(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<OfflineModeRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::set_offline_mode(&state.pool, auth.user_id, payload.offline_mode)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(user_response(&state.cipher, &user)))
}

/// `DELETE /users/me`
pub async fn delete_account(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, auth.user_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }
        .into());
    }
    tracing::info!(user_id = auth.user_id, "User account deleted");
    Ok(StatusCode::NO_CONTENT)
}
