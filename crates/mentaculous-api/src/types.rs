//! API types and DTOs.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mentaculous_core::Direction;
use mentaculous_ops::{OpsContext, OpsError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Shared application state for the API.
pub struct ApiState {
    /// The operations context.
    pub ctx: OpsContext,
}

/// Response wrapper with timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data.
    pub data: T,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl<T> ApiResponse<T> {
    /// Create a new API response with current timestamp.
    pub fn new(data: T) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { data, timestamp }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` with the wrapped payload.
    pub fn ok(data: T) -> Response {
        (StatusCode::OK, Json(Self::new(data))).into_response()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Players in the ledger.
    pub players: usize,
    /// Home runs in the ledger.
    pub home_runs: usize,
}

/// Error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// `400 Bad Request`.
    pub fn bad_request(message: impl Into<String>) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::new(Self::new("BAD_REQUEST", message))),
        )
            .into_response()
    }
}

/// Map an operation error to a status code and payload.
pub fn ops_error_response(err: OpsError) -> Response {
    let (status, code) = match &err {
        OpsError::GameNotFound { .. } => (StatusCode::NOT_FOUND, "GAME_NOT_FOUND"),
        OpsError::PlayerNotFound { .. } => (StatusCode::NOT_FOUND, "PLAYER_NOT_FOUND"),
        OpsError::NoHomeRun { .. } => (StatusCode::BAD_REQUEST, "NO_HOME_RUN"),
        OpsError::BackupNotConfigured => (StatusCode::SERVICE_UNAVAILABLE, "BACKUP_NOT_CONFIGURED"),
        e if e.is_upstream() => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    if status.is_server_error() {
        error!(code, "Request failed: {}", err);
    }
    (
        status,
        Json(ApiResponse::new(ApiError::new(code, err.to_string()))),
    )
        .into_response()
}

/// Body of `POST /ledger/{playerId}/move`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveBody {
    pub direction: Direction,
}
