//! User entity model and DTOs.

use glhfchat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// `password_hash` is an Argon2id PHC string and `api_key` is in encoded
/// form -- NEVER serialize this struct to API responses directly. Use
/// [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Encrypted GLHF API key (`hex32:hex+`), or `None` when unset.
    pub api_key: Option<String>,
    pub offline_mode: bool,
    pub request_count: i32,
    pub request_count_reset_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
///
/// `api_key` here is the DECRYPTED key and is only ever populated for the
/// authenticated owner.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub offline_mode: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. `password_hash` is already hashed and
/// `api_key`, when present, is still plaintext -- the repository encodes
/// it before persisting.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub api_key: Option<String>,
}

/// DTO for partial profile updates. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Already-hashed replacement password.
    pub password_hash: Option<String>,
}
