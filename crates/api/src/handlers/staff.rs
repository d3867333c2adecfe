//! Staff directory management (admin only).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bildir_core::error::CoreError;
use bildir_db::models::user::{CreateUser, StaffAccount};
use bildir_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/staff/add`.
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub username: String,
    pub password: String,
    /// Floor assignments; duplicates are collapsed.
    #[serde(default)]
    pub floors: Vec<i64>,
}

/// Request body for `POST /admin/staff/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteStaffRequest {
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/staff
///
/// List all accounts with their floor sets.
pub async fn list_staff(
    _session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StaffAccount>>>> {
    let accounts = UserRepo::list_with_floors(&state.pool).await?;
    Ok(Json(DataResponse { data: accounts }))
}

/// POST /admin/staff/add
///
/// Create a personnel account. The password is stored only as an argon2
/// hash; floor assignments are inserted as a set.
pub async fn add_staff(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StaffAccount>>)> {
    if input.username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username and password are required".into(),
        )));
    }
    if input.floors.iter().any(|f| *f < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "floors must be non-negative integers".into(),
        )));
    }

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username already exists: {}",
            input.username
        ))));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        password_hash: hashed,
        is_admin: false,
    };
    let user = UserRepo::create_with_floors(&state.pool, &create, &input.floors).await?;
    let floors = UserRepo::floors_for(&state.pool, user.id).await?;

    tracing::info!(username = %user.username, "Staff account created");

    let account = StaffAccount {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
        floors: floors.into_iter().collect(),
        created_at: user.created_at,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: account })))
}

/// POST /admin/staff/delete
///
/// Delete a personnel account, its floor assignments, and its sessions.
pub async fn delete_staff(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<DeleteStaffRequest>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete_by_username(&state.pool, &input.username).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            key: input.username,
        }));
    }

    tracing::info!(username = %input.username, "Staff account deleted");
    Ok(StatusCode::NO_CONTENT)
}
