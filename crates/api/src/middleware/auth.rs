//! Identity extractors for Axum handlers.
//!
//! A caller is authenticated when it presents a bearer token whose
//! signature and expiry check out AND whose `jti` still has a live row in
//! the `sessions` table (logout revokes the row). The extractors split the
//! two identity classes:
//!
//! - [`AdminSession`]: the shared-admin identity; staff tokens get 403.
//! - [`StaffSession`]: a floor-scoped personnel identity with its floor
//!   set loaded; admin tokens get 403.
//! - [`CallerIdentity`]: either class, for actions both may perform.

use std::collections::BTreeSet;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bildir_core::error::CoreError;
use bildir_core::scope::Identity;
use bildir_core::types::DbId;
use bildir_db::models::session::{KIND_ADMIN, KIND_STAFF};
use bildir_db::repositories::{SessionRepo, UserRepo};

use crate::auth::token::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller of either identity class.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub identity: Identity,
    /// Token id of the session backing this request.
    pub jti: String,
}

/// Requires the shared-admin identity. Staff callers are rejected with 403.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub jti: String,
}

/// Requires a staff identity; carries the account id and its floor set.
#[derive(Debug, Clone)]
pub struct StaffSession {
    pub user_id: DbId,
    pub floors: BTreeSet<i64>,
    pub jti: String,
}

/// Resolve the bearer token in `parts` to an identity and its token id.
///
/// Fails with `Unauthorized` when the token is missing, malformed,
/// expired, revoked, or references a session that no longer exists
/// (e.g. the staff account was deleted).
async fn authenticate(parts: &Parts, state: &AppState) -> Result<(Identity, String), AppError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.session).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    let session = SessionRepo::find_active(&state.pool, &claims.jti, chrono::Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Session is no longer active".into()))
        })?;

    let identity = match session.kind.as_str() {
        KIND_ADMIN => Identity::Admin,
        KIND_STAFF => {
            let user_id = session.user_id.ok_or_else(|| {
                AppError::InternalError("Staff session without an account id".into())
            })?;
            let floors = UserRepo::floors_for(&state.pool, user_id).await?;
            Identity::Staff { user_id, floors }
        }
        other => {
            return Err(AppError::InternalError(format!(
                "Unknown session kind: {other}"
            )))
        }
    };

    Ok((identity, session.jti))
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (identity, jti) = authenticate(parts, state).await?;
        Ok(CallerIdentity { identity, jti })
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state).await? {
            (Identity::Admin, jti) => Ok(AdminSession { jti }),
            (Identity::Staff { .. }, _) => Err(AppError::Core(CoreError::Forbidden(
                "Admin identity required".into(),
            ))),
        }
    }
}

impl FromRequestParts<AppState> for StaffSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state).await? {
            (Identity::Staff { user_id, floors }, jti) => Ok(StaffSession {
                user_id,
                floors,
                jti,
            }),
            (Identity::Admin, _) => Err(AppError::Core(CoreError::Forbidden(
                "Staff identity required".into(),
            ))),
        }
    }
}
