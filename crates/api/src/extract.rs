//! Typed decoding of the public submission payload.
//!
//! Visitors submit either JSON (the feedback page) or urlencoded form data
//! (older form snapshots). Both shapes are normalized here, at the
//! boundary, into one canonical [`SubmitFeedback`] before any business
//! logic runs; irreconcilable input fails fast instead of being repaired
//! deep inside a handler.

use axum::extract::{Form, FromRequest, Json, Request};
use axum::http::header::CONTENT_TYPE;
use bildir_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// Extractor accepting either a JSON body or an urlencoded form.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(JsonOrForm(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(JsonOrForm(value))
        }
    }
}

/// The issue list as it may arrive on the wire: a proper JSON array, or a
/// single string (form submissions encode the array as one JSON string;
/// a bare id is also accepted).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IssueList {
    Many(Vec<String>),
    One(String),
}

impl IssueList {
    /// Normalize into the canonical list-of-ids shape.
    ///
    /// A `[`-prefixed string must parse as a JSON array of strings;
    /// anything else `[`-prefixed is rejected rather than smuggled through
    /// as a single id.
    pub fn normalize(self) -> Result<Vec<String>, CoreError> {
        match self {
            IssueList::Many(ids) => Ok(ids),
            IssueList::One(text) => {
                let trimmed = text.trim();
                if trimmed.starts_with('[') {
                    serde_json::from_str::<Vec<String>>(trimmed).map_err(|_| {
                        CoreError::Validation("issues listesi çözümlenemedi".into())
                    })
                } else if trimmed.is_empty() {
                    Ok(Vec::new())
                } else {
                    Ok(vec![text])
                }
            }
        }
    }
}

/// Raw submission payload (JSON or form fields).
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// The location code; historical clients used several field names.
    #[serde(alias = "loc", alias = "location")]
    pub location_code: Option<String>,
    pub issues: Option<IssueList>,
    pub note: Option<String>,
}

/// Canonical, validated submission.
#[derive(Debug)]
pub struct SubmitFeedback {
    pub code: String,
    pub issues: Vec<String>,
    pub note: String,
}

impl SubmitRequest {
    /// Validate and normalize into the canonical shape.
    ///
    /// The code is mandatory, and at least one of (issues, note) must be
    /// non-empty.
    pub fn canonicalize(self) -> Result<SubmitFeedback, CoreError> {
        let issues = match self.issues {
            Some(list) => list.normalize()?,
            None => Vec::new(),
        };
        let note = self.note.unwrap_or_default();

        let code = self
            .location_code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| CoreError::Validation("Eksik alan (loc gerekli)".into()))?;

        if issues.is_empty() && note.is_empty() {
            return Err(CoreError::Validation(
                "Eksik alan (en az bir seçenek seçilmeli veya not girilmeli)".into(),
            ));
        }

        Ok(SubmitFeedback { code, issues, note })
    }
}
