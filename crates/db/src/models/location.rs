//! Location entity model and DTOs.

use bildir_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full location row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub code: String,
    pub name: String,
    /// Category driving the issue checklist (`toilet`, `room`, ...).
    /// Stored in the `type` column.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category: String,
    /// Public feedback URL encoded in the QR artifact.
    pub qr_url: String,
    /// Summary of the most recent feedback, if any.
    pub last_status: Option<String>,
    /// Floor number used for staff scoping; absent locations are outside
    /// every staff scope.
    pub floor: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a new location.
#[derive(Debug, Deserialize)]
pub struct CreateLocation {
    pub code: String,
    pub name: String,
    pub category: String,
    pub floor: Option<i64>,
}
