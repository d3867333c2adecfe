//! Repository for the `locations` table.

use bildir_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use crate::models::location::{CreateLocation, Location};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, type, qr_url, last_status, floor, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    ///
    /// `qr_url` is the public feedback URL computed by the caller from the
    /// configured base URL and the code.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateLocation,
        qr_url: &str,
        now: Timestamp,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (code, name, type, qr_url, floor, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.category)
            .bind(qr_url)
            .bind(input.floor)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its public code.
    pub async fn find_by_code(
        pool: &SqlitePool,
        code: &str,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE code = ?");
        sqlx::query_as::<_, Location>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all locations, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY id DESC");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// Delete a location and all of its feedback rows in one transaction.
    ///
    /// Returns `false` when no location with the given code exists.
    pub async fn delete_by_code(pool: &SqlitePool, code: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: Option<(DbId,)> = sqlx::query_as("SELECT id FROM locations WHERE code = ?")
            .bind(code)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((id,)) = id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM feedbacks WHERE location_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Overwrite a location's last-status summary and update timestamp.
    ///
    /// Accepts any executor so the feedback submission can run it inside
    /// its own transaction.
    pub async fn record_status<'e, E>(
        executor: E,
        id: DbId,
        summary: &str,
        at: Timestamp,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query("UPDATE locations SET last_status = ?, updated_at = ? WHERE id = ?")
            .bind(summary)
            .bind(at)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
