//! Login session model and DTO.

use bildir_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Identity class of a session, stored in the `kind` column.
pub const KIND_ADMIN: &str = "admin";
pub const KIND_STAFF: &str = "staff";

/// Full session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    /// Token identifier (`jti` claim); unique per issued token.
    pub jti: String,
    /// `admin` or `staff`.
    pub kind: String,
    /// NULL for the shared-admin identity.
    pub user_id: Option<DbId>,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for registering a newly issued token.
#[derive(Debug)]
pub struct CreateSession {
    pub jti: String,
    pub kind: &'static str,
    pub user_id: Option<DbId>,
    pub expires_at: Timestamp,
}
