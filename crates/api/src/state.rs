use std::sync::Arc;

use bildir_core::catalog::IssueCatalog;

use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::qr::QrIssuer;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bildir_db::DbPool,
    /// Server configuration.
    pub config: Arc<AppConfig>,
    /// Category → checklist table, built once at startup.
    pub catalog: Arc<IssueCatalog>,
    /// Best-effort outward notification sink.
    pub notifier: Arc<Notifier>,
    /// QR artifact writer/remover.
    pub qr: Arc<QrIssuer>,
}
