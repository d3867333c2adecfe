//! Staff account model and DTOs.

use bildir_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`StaffAccount`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// Safe directory view: an account plus its assigned floor set.
#[derive(Debug, Clone, Serialize)]
pub struct StaffAccount {
    pub id: DbId,
    pub username: String,
    pub is_admin: bool,
    pub floors: Vec<i64>,
    pub created_at: Timestamp,
}

/// DTO for creating a new staff account.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}
