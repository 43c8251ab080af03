//! Schedule, box score and player endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use chrono::NaiveDate;
use mentaculous_core::PlayerId;
use mentaculous_ops::{BoxScoreRequest, GamesRequest, PlayerRequest};
use serde::Deserialize;
use tracing::info;

use crate::types::{ops_error_response, ApiError, ApiResponse, ApiState};

/// Query parameters carrying an optional date.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// GET /api/games?date=YYYY-MM-DD
pub async fn games_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Response {
    match state.ctx.games(GamesRequest { date: query.date }).await {
        Ok(response) => {
            info!(date = %response.date, games = response.games.len(), "Schedule served");
            ApiResponse::ok(response)
        }
        Err(e) => ops_error_response(e),
    }
}

/// GET /api/games/{gamePk}/boxscore?date=YYYY-MM-DD
pub async fn box_score_handler(
    State(state): State<Arc<ApiState>>,
    Path(game_pk): Path<u64>,
    Query(query): Query<DateQuery>,
) -> Response {
    let mut request = BoxScoreRequest::new(game_pk);
    request.date = query.date;
    match state.ctx.box_score(request).await {
        Ok(response) => ApiResponse::ok(response),
        Err(e) => ops_error_response(e),
    }
}

/// GET /api/players/{playerId}
pub async fn player_handler(
    State(state): State<Arc<ApiState>>,
    Path(player_id): Path<String>,
) -> Response {
    let Ok(player_id) = player_id.parse::<PlayerId>() else {
        return ApiError::bad_request(format!("invalid player id: {player_id}"));
    };
    match state.ctx.player(PlayerRequest::new(player_id)).await {
        Ok(profile) => ApiResponse::ok(profile),
        Err(e) => ops_error_response(e),
    }
}
