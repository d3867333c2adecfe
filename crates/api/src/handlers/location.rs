//! Location registry management (admin only).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bildir_core::error::CoreError;
use bildir_db::models::location::{CreateLocation, Location};
use bildir_db::repositories::LocationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/locations/add`.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub code: String,
    pub name: String,
    #[serde(alias = "type")]
    pub category: String,
    pub floor: Option<i64>,
}

/// Request body for `POST /admin/locations/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteLocationRequest {
    pub code: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/locations
///
/// List all locations, newest first.
pub async fn list_locations(
    _session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Location>>>> {
    let locations = LocationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// POST /admin/locations/add
///
/// Create a location and its QR artifact. The artifact write is
/// best-effort: a file-system failure is logged, never surfaced.
pub async fn add_location(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Location>>)> {
    if input.code.is_empty() || input.name.is_empty() || input.category.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "code, name and type are required".into(),
        )));
    }
    if input.floor.is_some_and(|f| f < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "floor must be a non-negative integer".into(),
        )));
    }

    if LocationRepo::find_by_code(&state.pool, &input.code)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Location code already exists: {}",
            input.code
        ))));
    }

    let qr_url = state.config.feedback_url(&input.code);
    let create = CreateLocation {
        code: input.code,
        name: input.name,
        category: input.category,
        floor: input.floor,
    };
    let location = LocationRepo::create(&state.pool, &create, &qr_url, chrono::Utc::now()).await?;

    if let Err(err) = state.qr.write(&location.code, &location.qr_url) {
        tracing::warn!(code = %location.code, error = %err, "Failed to write QR artifact");
    }

    tracing::info!(code = %location.code, "Location created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// POST /admin/locations/delete
///
/// Delete a location, its feedback rows (same transaction), and its QR
/// artifact (best-effort).
pub async fn delete_location(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<DeleteLocationRequest>,
) -> AppResult<StatusCode> {
    let deleted = LocationRepo::delete_by_code(&state.pool, &input.code).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            key: input.code,
        }));
    }

    if let Err(err) = state.qr.remove(&input.code) {
        tracing::warn!(code = %input.code, error = %err, "Failed to remove QR artifact");
    }

    tracing::info!(code = %input.code, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
