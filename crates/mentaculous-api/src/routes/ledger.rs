//! Home-run ledger endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use mentaculous_core::PlayerId;
use mentaculous_ops::{
    AddHomeRunRequest, LedgerPageRequest, MoveEntryRequest, RemoveHomeRunRequest,
};
use tracing::info;

use crate::types::{ops_error_response, ApiError, ApiResponse, ApiState, MoveBody};

fn parse_player(raw: &str) -> Result<PlayerId, Response> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("invalid player id: {raw}")))
}

/// GET /api/ledger?page=N
pub async fn page_handler(
    State(state): State<Arc<ApiState>>,
    Query(request): Query<LedgerPageRequest>,
) -> Response {
    match state.ctx.ledger_page(request).await {
        Ok(page) => ApiResponse::ok(page),
        Err(e) => ops_error_response(e),
    }
}

/// GET /api/ledger/{playerId}
pub async fn entry_handler(
    State(state): State<Arc<ApiState>>,
    Path(player_id): Path<String>,
) -> Response {
    let player_id = match parse_player(&player_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.ctx.ledger_entry(player_id).await {
        Ok(entry) => ApiResponse::ok(entry),
        Err(e) => ops_error_response(e),
    }
}

/// POST /api/ledger - Log a player's home runs from a game.
pub async fn add_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AddHomeRunRequest>,
) -> Response {
    info!(game_pk = request.game_pk, player_id = %request.player_id, "Add request");
    match state.ctx.add_home_runs(request).await {
        Ok(response) => ApiResponse::ok(response),
        Err(e) => ops_error_response(e),
    }
}

/// DELETE /api/ledger/{playerId}/{hrId}
pub async fn remove_handler(
    State(state): State<Arc<ApiState>>,
    Path((player_id, hr_id)): Path<(String, String)>,
) -> Response {
    let player_id = match parse_player(&player_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    info!(player_id = %player_id, hr_id = %hr_id, "Remove request");
    match state
        .ctx
        .remove_home_run(RemoveHomeRunRequest::new(player_id, hr_id))
        .await
    {
        Ok(response) => ApiResponse::ok(response),
        Err(e) => ops_error_response(e),
    }
}

/// POST /api/ledger/{playerId}/move
pub async fn move_handler(
    State(state): State<Arc<ApiState>>,
    Path(player_id): Path<String>,
    Json(body): Json<MoveBody>,
) -> Response {
    let player_id = match parse_player(&player_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state
        .ctx
        .move_entry(MoveEntryRequest::new(player_id, body.direction))
        .await
    {
        Ok(response) => ApiResponse::ok(response),
        Err(e) => ops_error_response(e),
    }
}
