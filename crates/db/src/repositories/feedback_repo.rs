//! Repository for the `feedbacks` table.

use std::collections::BTreeSet;

use bildir_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use crate::models::feedback::{Feedback, FeedbackWithFloor, UnresolvedFeedback};
use crate::repositories::LocationRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, location_id, status, meta, reported_at, resolved";

/// Provides persistence for feedback reports.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert a feedback row and refresh the owning location's last-status,
    /// both inside one transaction so a crash can never record a submission
    /// without its status update (or vice versa).
    pub async fn create_with_status(
        pool: &SqlitePool,
        location_id: DbId,
        status: &str,
        meta_json: &str,
        reported_at: Timestamp,
    ) -> Result<Feedback, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO feedbacks (location_id, status, meta, reported_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let feedback = sqlx::query_as::<_, Feedback>(&query)
            .bind(location_id)
            .bind(status)
            .bind(meta_json)
            .bind(reported_at)
            .fetch_one(&mut *tx)
            .await?;

        LocationRepo::record_status(&mut *tx, location_id, status, reported_at).await?;

        tx.commit().await?;
        Ok(feedback)
    }

    /// List unresolved feedback joined with location details, newest first.
    ///
    /// `floor_scope` follows the scoping contract: `None` is unscoped
    /// (admin); an empty set yields an empty list without touching the
    /// database; a non-empty set restricts to locations on those floors.
    pub async fn list_unresolved(
        pool: &SqlitePool,
        floor_scope: Option<&BTreeSet<i64>>,
        limit: i64,
    ) -> Result<Vec<UnresolvedFeedback>, sqlx::Error> {
        const BASE: &str = "SELECT f.id, f.status, f.meta, f.reported_at, \
                            l.code, l.name, l.type, l.floor
             FROM feedbacks f
             JOIN locations l ON l.id = f.location_id
             WHERE f.resolved = 0";

        match floor_scope {
            None => {
                let query = format!("{BASE} ORDER BY f.reported_at DESC, f.id DESC LIMIT ?");
                sqlx::query_as::<_, UnresolvedFeedback>(&query)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            Some(floors) if floors.is_empty() => Ok(Vec::new()),
            Some(floors) => {
                let placeholders = vec!["?"; floors.len()].join(", ");
                let query = format!(
                    "{BASE} AND l.floor IN ({placeholders})
                     ORDER BY f.reported_at DESC, f.id DESC LIMIT ?"
                );
                let mut q = sqlx::query_as::<_, UnresolvedFeedback>(&query);
                for floor in floors {
                    q = q.bind(floor);
                }
                q.bind(limit).fetch_all(pool).await
            }
        }
    }

    /// Find a feedback row joined with its location's floor, for
    /// authorization checks before resolution.
    pub async fn find_with_floor(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<FeedbackWithFloor>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackWithFloor>(
            "SELECT f.id, f.location_id, l.floor
             FROM feedbacks f
             JOIN locations l ON l.id = f.location_id
             WHERE f.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Hard-delete a feedback row. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
