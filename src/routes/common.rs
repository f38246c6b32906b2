//! Operational routes: liveness and readiness.

use crate::classify::path_not_found;
use crate::sql::QueryBuf;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.db.execute(&QueryBuf::raw("SELECT 1")).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

/// GET /health, GET /ready (runs `SELECT 1` through the executor).
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(path_not_found))
        .route("/ready", get(ready).fallback(path_not_found))
        .with_state(state)
}
