pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, feedback, location, pages, staff};
use crate::state::AppState;

/// Build the application route table.
///
/// ```text
/// GET  /                         redirect to /admin
/// GET  /feedback?loc=CODE        public checklist form          (none)
/// POST /api/feedback             submit feedback                (none)
///
/// GET  /admin                    admin shell                    (none*)
/// POST /admin/login              shared-credential login        (none)
/// POST /admin/logout             revoke admin session           (admin)
/// GET  /api/unresolved           unresolved feedback, unscoped  (admin)
/// POST /admin/resolve            resolve one feedback           (admin or scoped staff)
/// GET  /api/locations            list locations                 (admin)
/// POST /admin/locations/add      create location + QR artifact  (admin)
/// POST /admin/locations/delete   delete location + feedback     (admin)
///
/// GET  /staff/login              staff login page               (none)
/// POST /staff/login              per-account login              (none)
/// POST /staff/logout             revoke staff session           (staff)
/// GET  /staff                    staff shell                    (none*)
/// GET  /staff/api/unresolved     unresolved, floor-scoped       (staff)
///
/// POST /admin/staff/add          create staff account           (admin)
/// POST /admin/staff/delete       delete staff account           (admin)
/// GET  /api/staff                list staff + floor sets        (admin)
///
/// * static shells; every data call they issue carries the bearer token.
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Public surface.
        .route("/", get(pages::index))
        .route("/feedback", get(pages::feedback_page))
        .route("/api/feedback", post(feedback::submit))
        // Admin surface.
        .route("/admin", get(pages::admin_page))
        .route("/admin/login", post(auth::admin_login))
        .route("/admin/logout", post(auth::admin_logout))
        .route("/api/unresolved", get(feedback::list_unresolved))
        .route("/admin/resolve", post(feedback::resolve))
        .route("/api/locations", get(location::list_locations))
        .route("/admin/locations/add", post(location::add_location))
        .route("/admin/locations/delete", post(location::delete_location))
        // Staff surface.
        .route(
            "/staff/login",
            get(pages::staff_login_page).post(auth::staff_login),
        )
        .route("/staff/logout", post(auth::staff_logout))
        .route("/staff", get(pages::staff_page))
        .route("/staff/api/unresolved", get(feedback::staff_unresolved))
        // Staff directory (admin).
        .route("/admin/staff/add", post(staff::add_staff))
        .route("/admin/staff/delete", post(staff::delete_staff))
        .route("/api/staff", get(staff::list_staff))
}
