//! Backup endpoint.

use std::sync::Arc;

use axum::{extract::State, response::Response, Json};
use mentaculous_ops::BackupRequest;
use tracing::{info, warn};

use crate::types::{ops_error_response, ApiResponse, ApiState};

/// POST /api/backup - Push the ledger to the backup table.
pub async fn backup_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<BackupRequest>,
) -> Response {
    match state.ctx.backup(request).await {
        Ok(response) => {
            info!(user_id = %response.user_id, players = response.players, "Backup completed");
            ApiResponse::ok(response)
        }
        Err(e) => {
            warn!("Backup failed: {}", e);
            ops_error_response(e)
        }
    }
}
