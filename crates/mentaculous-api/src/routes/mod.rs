//! API route handlers.

mod backup;
mod games;
mod health;
mod ledger;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use mentaculous_ops::OpsContext;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::types::ApiState;

/// Create the API router with all endpoints, relative to its mount point.
pub fn create_api_router(ctx: OpsContext) -> Router {
    let state = Arc::new(ApiState { ctx });

    Router::new()
        // Health
        .route("/health", get(health::health_handler))
        // Stats
        .route("/games", get(games::games_handler))
        .route("/games/{game_pk}/boxscore", get(games::box_score_handler))
        .route("/players/{player_id}", get(games::player_handler))
        // Ledger
        .route(
            "/ledger",
            get(ledger::page_handler).post(ledger::add_handler),
        )
        .route("/ledger/{player_id}", get(ledger::entry_handler))
        .route("/ledger/{player_id}/{hr_id}", delete(ledger::remove_handler))
        .route("/ledger/{player_id}/move", post(ledger::move_handler))
        // Backup
        .route("/backup", post(backup::backup_handler))
        .with_state(state)
}

/// Create the full application: the API under `/api`, with request tracing
/// and permissive CORS.
pub fn create_app(ctx: OpsContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", create_api_router(ctx))
        // Request tracing (enable with RUST_LOG=tower_http=info or higher)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
}
