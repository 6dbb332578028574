//! Liveness check

use crate::AppState;
use axum::{extract::State, Json};
use parks_core::HealthResponse;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        storage: state.storage.kind(),
    })
}
