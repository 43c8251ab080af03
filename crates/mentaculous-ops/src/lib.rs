//! Mentaculous Operations Layer
//!
//! This crate provides a typed API for every Mentaculous operation: schedules,
//! enriched box scores, player profiles, the home-run ledger and its backup.
//! It is consumed by both the CLI and the REST API, so the two surfaces behave
//! the same.
//!
//! ## Architecture
//!
//! - **Requests**: Typed input DTOs for each operation
//! - **Responses**: Typed output DTOs with all relevant data
//! - **OpsContext**: The service that executes operations
//! - **StatsSource**: Read access to the MLB stats API ([`StatsClient`] over HTTP)
//! - **LedgerStore**: The ledger with write-through persistence
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mentaculous_ops::{Config, GamesRequest, OpsContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let ctx = OpsContext::new(config)?;
//!
//!     let response = ctx.games(GamesRequest::today()).await?;
//!     println!("{} games on {}", response.games.len(), response.date);
//!     Ok(())
//! }
//! ```

mod backup;
mod client;
mod config;
mod context;
mod error;
mod fixture;
mod requests;
mod responses;
mod store;

// Re-export public API
pub use backup::{BackupClient, BackupSnapshot, BACKUP_TABLE};
pub use client::{
    hitting_stats, parse_stats, StatGroup, StatsClient, StatsQuery, StatsSource, StatsType,
};
pub use config::{Config, CONFIG_KEYS, DEFAULT_STATS_API_BASE};
pub use context::{OpsContext, DEFAULT_BACKUP_USER};
pub use error::{OpsError, OpsResult};
pub use fixture::StaticSource;
pub use requests::*;
pub use responses::*;
pub use store::{FileStore, KeyValueStore, LedgerStore, MemoryStore, LEDGER_KEY, ORDER_KEY};
