use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use vitrin_core::locale::Locale;

use crate::state::AppState;

/// Liveness report for load balancers and the manage dashboard.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` when every dependency is usable, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether `UPLOAD_DIR` exists, so uploads and `/uploads/*` can work.
    pub uploads_ready: bool,
    /// Approximate number of cached public reads.
    pub cached_reads: u64,
    pub locales: Vec<&'static str>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = vitrin_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = tokio::fs::metadata(&state.config.upload_dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !db_healthy || !uploads_ready {
        tracing::warn!(db_healthy, uploads_ready, "Health check degraded");
    }

    Json(HealthResponse {
        status: if db_healthy && uploads_ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
        cached_reads: state.cache.entry_count(),
        locales: Locale::ALL.iter().map(|locale| locale.as_str()).collect(),
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
