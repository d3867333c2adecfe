//! Repository for the `users` and `user_floors` tables.

use std::collections::BTreeSet;

use bildir_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::user::{CreateUser, StaffAccount, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, is_admin, created_at";

/// Provides CRUD operations for staff accounts and their floor assignments.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new account with its floor assignments in one transaction.
    ///
    /// Duplicate floors collapse through the `UNIQUE(user_id, floor)`
    /// constraint (`INSERT OR IGNORE`): the association is a set.
    pub async fn create_with_floors(
        pool: &SqlitePool,
        input: &CreateUser,
        floors: &[i64],
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, password_hash, is_admin)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(&mut *tx)
            .await?;

        for floor in floors {
            sqlx::query("INSERT OR IGNORE INTO user_floors (user_id, floor) VALUES (?, ?)")
                .bind(user.id)
                .bind(floor)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Find an account by username (case-sensitive).
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// The floor set assigned to an account.
    pub async fn floors_for(
        pool: &SqlitePool,
        user_id: DbId,
    ) -> Result<BTreeSet<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT floor FROM user_floors WHERE user_id = ? ORDER BY floor")
                .bind(user_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(f,)| f).collect())
    }

    /// Delete an account, removing its floor associations and sessions
    /// first, all in one transaction.
    ///
    /// Returns `false` when no account with the given username exists.
    pub async fn delete_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: Option<(DbId,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((id,)) = id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM user_floors WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// List all accounts with their floor sets, oldest first.
    pub async fn list_with_floors(pool: &SqlitePool) -> Result<Vec<StaffAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&query).fetch_all(pool).await?;

        let assignments: Vec<(DbId, i64)> =
            sqlx::query_as("SELECT user_id, floor FROM user_floors ORDER BY user_id, floor")
                .fetch_all(pool)
                .await?;

        Ok(users
            .into_iter()
            .map(|u| {
                let floors = assignments
                    .iter()
                    .filter(|(uid, _)| *uid == u.id)
                    .map(|(_, f)| *f)
                    .collect();
                StaffAccount {
                    id: u.id,
                    username: u.username,
                    is_admin: u.is_admin,
                    floors,
                    created_at: u.created_at,
                }
            })
            .collect())
    }
}
