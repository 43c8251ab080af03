//! REST API service for Mentaculous.
//!
//! Exposes the operations layer over HTTP for any frontend. All routes are
//! mounted under `/api` and answer with an [`ApiResponse`] envelope; errors
//! carry an [`ApiError`] payload.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check with ledger counts
//! - `GET /api/games?date=YYYY-MM-DD` - Schedule for a date
//! - `GET /api/games/{gamePk}/boxscore` - Enriched box score
//! - `GET /api/players/{playerId}` - Player profile
//! - `GET /api/ledger?page=N` - Ledger page in display order
//! - `POST /api/ledger` - Log home runs `{gamePk, playerId, seasonHrNumber?}`
//! - `GET /api/ledger/{playerId}` - One player's entry
//! - `DELETE /api/ledger/{playerId}/{hrId}` - Delete a logged home run
//! - `POST /api/ledger/{playerId}/move` - Reorder `{direction: "up" | "down"}`
//! - `POST /api/backup` - Push a backup snapshot `{userId?}`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mentaculous_api::create_app;
//! use mentaculous_ops::{Config, OpsContext};
//!
//! let ctx = OpsContext::new(Config::load().unwrap()).unwrap();
//! let app = create_app(ctx);
//! ```

mod routes;
mod types;

pub use routes::{create_api_router, create_app};
pub use types::{ApiError, ApiResponse, ApiState, HealthResponse};
