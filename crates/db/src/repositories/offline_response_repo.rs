//! Repository for the offline answer cache.

use glhfchat_core::types::DbId;
use sqlx::PgPool;

use crate::models::offline_response::OfflineResponse;

const COLUMNS: &str = "id, user_id, chat_id, query, response, used, created_at, updated_at";

/// Normalize a query for cache matching: trimmed, lowercased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Lookup and recording of previously served offline answers.
pub struct OfflineResponseRepo;

impl OfflineResponseRepo {
    /// Find a cached answer for a user's normalized query.
    pub async fn find_by_query(
        pool: &PgPool,
        user_id: Option<DbId>,
        query: &str,
    ) -> Result<Option<OfflineResponse>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM offline_responses
             WHERE query = $1 AND user_id IS NOT DISTINCT FROM $2
             ORDER BY updated_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, OfflineResponse>(&sql)
            .bind(normalize_query(query))
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Record an answer served in offline mode.
    pub async fn record(
        pool: &PgPool,
        user_id: Option<DbId>,
        chat_id: Option<DbId>,
        query: &str,
        response: &str,
    ) -> Result<OfflineResponse, sqlx::Error> {
        let sql = format!(
            "INSERT INTO offline_responses (user_id, chat_id, query, response)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OfflineResponse>(&sql)
            .bind(user_id)
            .bind(chat_id)
            .bind(normalize_query(query))
            .bind(response)
            .fetch_one(pool)
            .await
    }

    /// Mark a cached answer as reused.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE offline_responses SET used = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_query;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_query("  What Is Rust?  "), "what is rust?");
        assert_eq!(normalize_query(""), "");
    }
}
