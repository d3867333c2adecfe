//! Login and logout for both identity classes.
//!
//! The admin identity authenticates against the shared credential pair
//! from the environment; staff authenticate against their individual
//! argon2 hashes. Both flows issue an HS256 token and register its `jti`
//! in the `sessions` table; logout revokes that row, returning the caller
//! to anonymous.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bildir_core::error::CoreError;
use bildir_db::models::session::{CreateSession, KIND_ADMIN, KIND_STAFF};
use bildir_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::issue_token;
use crate::error::{AppError, AppResult};
use crate::extract::JsonOrForm;
use crate::middleware::auth::{AdminSession, StaffSession};
use crate::state::AppState;

/// Request body for both login endpoints.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub role: &'static str,
}

/// POST /admin/login
///
/// Authenticate the shared admin credential.
pub async fn admin_login(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.username != state.config.admin_user || input.password != state.config.admin_pass {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Kullanıcı/şifre hatalı".into(),
        )));
    }

    let response = open_session(&state, KIND_ADMIN, None).await?;
    tracing::info!("Admin session opened");
    Ok(Json(response))
}

/// POST /admin/logout
///
/// Revoke the calling admin session. Returns 204 No Content.
pub async fn admin_logout(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<StatusCode> {
    SessionRepo::revoke(&state.pool, &session.jti).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /staff/login
///
/// Authenticate a personnel account against its stored password hash.
pub async fn staff_login(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Kullanıcı/şifre hatalı".into())))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Kullanıcı/şifre hatalı".into(),
        )));
    }

    let response = open_session(&state, KIND_STAFF, Some(user.id)).await?;
    tracing::info!(user_id = user.id, "Staff session opened");
    Ok(Json(response))
}

/// POST /staff/logout
///
/// Revoke the calling staff session. Returns 204 No Content.
pub async fn staff_logout(
    State(state): State<AppState>,
    session: StaffSession,
) -> AppResult<StatusCode> {
    SessionRepo::revoke(&state.pool, &session.jti).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Issue a token and register its session row.
async fn open_session(
    state: &AppState,
    kind: &'static str,
    user_id: Option<i64>,
) -> AppResult<AuthResponse> {
    let issued = issue_token(user_id.unwrap_or(0), kind, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            jti: issued.jti,
            kind,
            user_id,
            expires_at: issued.expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        token: issued.token,
        expires_in: state.config.session.ttl_hours * 3600,
        role: kind,
    })
}
