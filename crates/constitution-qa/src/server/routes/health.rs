//! Health endpoint

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::HealthResponse;

/// GET / - Report the configured index and model
///
/// Reads process configuration only; no upstream call is made.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.retriever().index_name(),
        state.generator().model(),
    ))
}
