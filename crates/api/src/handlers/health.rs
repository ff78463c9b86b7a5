use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health
///
/// Liveness plus a store round-trip. Always 200: a broken store is
/// reported in the body, not as a 5xx, so load balancers can tell
/// "process up, store down" from "process down".
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = haven_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
