//! Repository for the `sessions` table.

use bildir_core::types::Timestamp;
use sqlx::SqlitePool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, jti, kind, user_id, expires_at, is_revoked, created_at";

/// Registers issued login tokens so logout can revoke them server-side.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (jti, kind, user_id, expires_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.jti)
            .bind(input.kind)
            .bind(input.user_id)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live session by token id: not revoked, not expired at `now`.
    pub async fn find_active(
        pool: &SqlitePool,
        jti: &str,
        now: Timestamp,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE jti = ? AND is_revoked = 0 AND expires_at > ?"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(jti)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a session by token id. Returns `true` if a row was updated.
    pub async fn revoke(pool: &SqlitePool, jti: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET is_revoked = 1 WHERE jti = ? AND is_revoked = 0")
                .bind(jti)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
