//! Feedback lifecycle: public submission, unresolved listings, resolution.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bildir_core::error::CoreError;
use bildir_core::report::{parse_meta, status_summary, ReportMeta};
use bildir_core::types::{DbId, Timestamp};
use bildir_db::models::feedback::{Feedback, UnresolvedFeedback};
use bildir_db::repositories::{FeedbackRepo, LocationRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonOrForm, SubmitRequest};
use crate::middleware::auth::{AdminSession, CallerIdentity, StaffSession};
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on rows returned by the unresolved listings.
const MAX_LISTING_ROWS: i64 = 500;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub feedback_id: DbId,
}

/// One row of an unresolved listing as exposed to dashboards.
#[derive(Debug, Serialize)]
pub struct UnresolvedView {
    pub id: DbId,
    pub status: String,
    pub reported_at: Timestamp,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub floor: Option<i64>,
    /// Parsed meta payload; degrades to `{ "raw": ... }` per row when the
    /// stored document does not parse.
    pub meta: Value,
}

impl From<UnresolvedFeedback> for UnresolvedView {
    fn from(row: UnresolvedFeedback) -> Self {
        let meta = parse_meta(row.meta.as_deref());
        Self {
            id: row.id,
            status: row.status,
            reported_at: row.reported_at,
            code: row.code,
            name: row.name,
            category: row.category,
            floor: row.floor,
            meta,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/feedback
///
/// Public, unauthenticated submission. Accepts JSON or form data; the
/// issue list is normalized at the boundary. On success the feedback row
/// and the location's last-status commit together, then a best-effort
/// notification goes out on a detached task.
pub async fn submit(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<SubmitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Feedback>>)> {
    let submission = input.canonicalize().map_err(AppError::Core)?;

    // Unknown codes surface as a generic 400 on this route, matching the
    // public API contract.
    let location = LocationRepo::find_by_code(&state.pool, &submission.code)
        .await?
        .ok_or_else(|| AppError::BadRequest("Konum bulunamadı".into()))?;

    let issues: Vec<_> = submission
        .issues
        .iter()
        .map(|id| state.catalog.resolve(&location.category, id))
        .collect();

    let summary = status_summary(&issues, &submission.note);
    let reported_at = chrono::Utc::now();

    let meta = ReportMeta {
        issues,
        note: submission.note.clone(),
        reported_at,
    };
    let meta_json = serde_json::to_string(&meta)
        .map_err(|e| AppError::InternalError(format!("Meta serialization error: {e}")))?;

    let feedback =
        FeedbackRepo::create_with_status(&state.pool, location.id, &summary, &meta_json, reported_at)
            .await?;

    tracing::info!(
        location = %location.code,
        feedback_id = feedback.id,
        status = %summary,
        "Feedback recorded"
    );

    state
        .notifier
        .notify_feedback(&location.name, &location.code, &summary, &submission.note);

    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/unresolved
///
/// All unresolved feedback, newest first. Admin only (unscoped).
pub async fn list_unresolved(
    _session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UnresolvedView>>>> {
    let rows = FeedbackRepo::list_unresolved(&state.pool, None, MAX_LISTING_ROWS).await?;
    let views = rows.into_iter().map(UnresolvedView::from).collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /staff/api/unresolved
///
/// Unresolved feedback restricted to the caller's floor set. An account
/// with no assigned floors sees an empty list.
pub async fn staff_unresolved(
    session: StaffSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UnresolvedView>>>> {
    let rows =
        FeedbackRepo::list_unresolved(&state.pool, Some(&session.floors), MAX_LISTING_ROWS)
            .await?;
    let views = rows.into_iter().map(UnresolvedView::from).collect();
    Ok(Json(DataResponse { data: views }))
}

/// POST /admin/resolve
///
/// Resolve (delete) a feedback row. Admin may resolve anything; staff only
/// feedback whose location floor is in their assigned set. Resolution is
/// deletion, so a second call for the same id reports 404.
pub async fn resolve(
    caller: CallerIdentity,
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<ResolveRequest>,
) -> AppResult<StatusCode> {
    let feedback = FeedbackRepo::find_with_floor(&state.pool, input.feedback_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Feedback",
                key: input.feedback_id.to_string(),
            })
        })?;

    if !caller.identity.may_act_on(feedback.floor) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Feedback is outside your assigned floors".into(),
        )));
    }

    let deleted = FeedbackRepo::delete(&state.pool, feedback.id).await?;
    if !deleted {
        // Lost a race with another resolver.
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            key: input.feedback_id.to_string(),
        }));
    }

    tracing::info!(feedback_id = feedback.id, "Feedback resolved");
    Ok(StatusCode::NO_CONTENT)
}
