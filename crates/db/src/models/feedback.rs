//! Feedback entity model and listing rows.

use bildir_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full feedback row from the `feedbacks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub location_id: DbId,
    /// Derived human-readable summary (joined issue labels or note excerpt).
    pub status: String,
    /// Structured JSON payload as stored; parsed leniently at view time.
    pub meta: Option<String>,
    pub reported_at: Timestamp,
    pub resolved: bool,
}

/// One row of the unresolved listing: feedback joined with its location.
#[derive(Debug, Clone, FromRow)]
pub struct UnresolvedFeedback {
    pub id: DbId,
    pub status: String,
    pub meta: Option<String>,
    pub reported_at: Timestamp,
    pub code: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub category: String,
    pub floor: Option<i64>,
}

/// Feedback joined with its location's floor, for authorization checks.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackWithFloor {
    pub id: DbId,
    pub location_id: DbId,
    pub floor: Option<i64>,
}
