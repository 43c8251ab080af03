//! Health check endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::types::{ApiResponse, ApiState, HealthResponse};

/// Handler for GET /api/health
pub async fn health_handler(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<HealthResponse>> {
    let ledger = state.ctx.ledger().await;
    let response = HealthResponse {
        status: "ok".to_string(),
        players: ledger.len(),
        home_runs: ledger.home_run_count(),
    };
    Json(ApiResponse::new(response))
}
