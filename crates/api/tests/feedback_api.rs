//! HTTP-level integration tests for the public submission flow and the
//! unresolved listings.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, body_text, build_test_app, create_location, get, get_auth, post_form,
    post_json, staff_token, submit_feedback,
};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// End-to-end: create `F01-W` (toilet, floor 1), submit two checklist
/// issues with no note, and verify the derived summary, the location's
/// last-status, and the floor-1 staff view all line up.
#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_end_to_end(pool: SqlitePool) {
    let app = build_test_app(pool);
    let admin = admin_token(app.clone()).await;
    create_location(app.clone(), &admin, "F01-W", "toilet", Some(1)).await;

    let body = serde_json::json!({
        "location_code": "F01-W",
        "issues": ["dirty", "soap_out"],
        "note": "",
    });
    let response = post_json(app.clone(), "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(
        created["data"]["status"],
        "Tuvalet genel temizliği gerekli, Sıvı sabun tükenmiş"
    );

    // The location's cached last-status was updated in the same commit.
    let response = get_auth(app.clone(), "/api/locations", &admin).await;
    let locations = body_json(response).await;
    assert_eq!(
        locations["data"][0]["last_status"],
        "Tuvalet genel temizliği gerekli, Sıvı sabun tükenmiş"
    );

    // A staff account scoped to floor 1 sees exactly that row.
    let staff = staff_token(app.clone(), "temizlik1", &[1]).await;
    let response = get_auth(app, "/staff/api/unresolved", &staff).await;
    let listing = body_json(response).await;
    let rows = listing["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["code"], "F01-W");
    assert_eq!(rows[0]["meta"]["issues"][1]["id"], "soap_out");
    assert_eq!(rows[0]["meta"]["issues"][1]["label"], "Sıvı sabun tükenmiş");
}

/// Submitting against an unknown code fails with 400 and records nothing,
/// regardless of payload content.
#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_unknown_code_records_nothing(pool: SqlitePool) {
    let app = build_test_app(pool.clone());

    let body = serde_json::json!({
        "location_code": "GHOST",
        "issues": ["dirty"],
        "note": "her şey kirli",
    });
    let response = post_json(app, "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedbacks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

/// Both issues and note empty is a validation failure.
#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_requires_issues_or_note(pool: SqlitePool) {
    let app = build_test_app(pool);
    let admin = admin_token(app.clone()).await;
    create_location(app.clone(), &admin, "F01-W", "toilet", Some(1)).await;

    let body = serde_json::json!({ "location_code": "F01-W", "issues": [], "note": "" });
    let response = post_json(app.clone(), "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Missing code entirely is also a validation failure.
    let body = serde_json::json!({ "issues": ["dirty"] });
    let response = post_json(app, "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Form submissions carry the issue list as one JSON-encoded string; the
/// boundary decode normalizes it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_accepts_form_encoding(pool: SqlitePool) {
    let app = build_test_app(pool);
    let admin = admin_token(app.clone()).await;
    create_location(app.clone(), &admin, "F01-W", "toilet", Some(1)).await;

    let body = "loc=F01-W&issues=%5B%22dirty%22%2C%22paper_out%22%5D&note=";
    let response = post_form(app.clone(), "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(
        created["data"]["status"],
        "Tuvalet genel temizliği gerekli, Tuvalet kağıdı bitmiş"
    );

    // A single bare id works too.
    let body = "loc=F01-W&issues=floor_wet&note=";
    let response = post_form(app, "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "Zemin ıslak / kaygan");
}

/// Unknown issue ids are preserved with the raw id as label.
#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_tolerates_unknown_issue_ids(pool: SqlitePool) {
    let app = build_test_app(pool);
    let admin = admin_token(app.clone()).await;
    create_location(app.clone(), &admin, "F01-W", "toilet", Some(1)).await;

    let body = serde_json::json!({
        "location_code": "F01-W",
        "issues": ["mirror_cracked", "dirty"],
        "note": "",
    });
    let response = post_json(app, "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(
        created["data"]["status"],
        "mirror_cracked, Tuvalet genel temizliği gerekli"
    );
}

/// Without issues the summary is the note excerpt.
#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_note_only_summarizes_note(pool: SqlitePool) {
    let app = build_test_app(pool);
    let admin = admin_token(app.clone()).await;
    create_location(app.clone(), &admin, "R201", "room", Some(2)).await;

    let body = serde_json::json!({
        "location_code": "R201",
        "issues": [],
        "note": "musluk damlatıyor",
    });
    let response = post_json(app, "/api/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "musluk damlatıyor");
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// The admin listing is newest first and parses each row's meta payload;
/// a malformed stored payload degrades to `{"raw": ...}` for that row only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn unresolved_listing_isolates_bad_meta(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let admin = admin_token(app.clone()).await;
    let location_id = create_location(app.clone(), &admin, "F01-W", "toilet", Some(1)).await;

    submit_feedback(app.clone(), "F01-W", &["dirty"], "").await;

    // A legacy row whose meta is not JSON, reported after the first row.
    sqlx::query(
        "INSERT INTO feedbacks (location_id, status, meta, reported_at)
         VALUES (?, 'Kirli', 'not json {', ?)",
    )
    .bind(location_id)
    .bind(chrono::Utc::now() + chrono::Duration::hours(1))
    .execute(&pool)
    .await
    .unwrap();

    let response = get_auth(app, "/api/unresolved", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(response).await;
    let rows = listing["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first: the hand-inserted future row leads.
    assert_eq!(rows[0]["meta"]["raw"], "not json {");
    assert_eq!(rows[1]["meta"]["issues"][0]["id"], "dirty");
}

// ---------------------------------------------------------------------------
// Feedback form page
// ---------------------------------------------------------------------------

/// The public form renders the category checklist; parameter and lookup
/// failures return plain-text errors.
#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_page_renders_checklist(pool: SqlitePool) {
    let app = build_test_app(pool);
    let admin = admin_token(app.clone()).await;
    create_location(app.clone(), &admin, "F01-W", "toilet", Some(1)).await;

    let response = get(app.clone(), "/feedback?loc=F01-W").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Sıvı sabun tükenmiş"));
    assert!(html.contains("value=\"floor_wet\""));

    let response = get(app.clone(), "/feedback").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/feedback?loc=GHOST").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Konum bulunamadı.");
}
