use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// GET /api: the static endpoint description.
pub async fn describe(State(state): State<AppState>) -> impl IntoResponse {
    ok("endpoints", state.endpoints.as_ref().clone())
}
