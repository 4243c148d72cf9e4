//! Repository for the `users` table.
//!
//! Every write path that can carry the `api_key` field routes the value
//! through [`ApiKeyCipher::encode`] before it reaches SQL, so plaintext
//! keys can never land in the store regardless of which entry point the
//! caller used. Reads of the key go through [`Self::decrypted_api_key`].

use glhfchat_core::crypto::ApiKeyCipher;
use glhfchat_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, api_key, offline_mode, \
                        request_count, request_count_reset_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A plaintext `api_key` in the input is encoded before persisting.
    /// Duplicate username/email surfaces as a unique-constraint database
    /// error (`uq_users_username` / `uq_users_email`).
    pub async fn create(
        pool: &PgPool,
        cipher: &ApiKeyCipher,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let encoded_key = input
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(|k| cipher.encode(k));

        let query = format!(
            "INSERT INTO users (username, email, password_hash, api_key)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(encoded_key)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored API key. Encodes before persisting; an empty
    /// key clears the field.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_api_key(
        pool: &PgPool,
        cipher: &ApiKeyCipher,
        id: DbId,
        api_key: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let encoded = if api_key.is_empty() {
            None
        } else {
            Some(cipher.encode(api_key))
        };

        let query = format!(
            "UPDATE users SET api_key = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(encoded)
            .fetch_optional(pool)
            .await
    }

    /// Toggle the offline-mode flag.
    pub async fn set_offline_mode(
        pool: &PgPool,
        id: DbId,
        enabled: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET offline_mode = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(enabled)
            .fetch_optional(pool)
            .await
    }

    /// Bump the usage counter, resetting it when the last reset is more
    /// than a day old.
    pub async fn increment_request_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                request_count = CASE
                    WHEN request_count_reset_at < NOW() - INTERVAL '1 day' THEN 1
                    ELSE request_count + 1
                END,
                request_count_reset_at = CASE
                    WHEN request_count_reset_at < NOW() - INTERVAL '1 day' THEN NOW()
                    ELSE request_count_reset_at
                END
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Decrypt the stored API key for a user.
    ///
    /// Returns `None` when no key is stored or when decoding yields an
    /// empty string (corrupt value or wrong cipher key -- a decode
    /// failure is indistinguishable from "no key").
    pub fn decrypted_api_key(cipher: &ApiKeyCipher, user: &User) -> Option<String> {
        let stored = user.api_key.as_deref()?;
        let decoded = cipher.decode(stored);
        if decoded.is_empty() {
            None
        } else {
            Some(decoded)
        }
    }
}
