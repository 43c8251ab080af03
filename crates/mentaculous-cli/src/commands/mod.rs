//! CLI command implementations.

pub mod backup;
pub mod boxscore;
pub mod config;
pub mod games;
pub mod ledger;
pub mod player;
pub mod serve;

use anyhow::Result;
use serde::Serialize;

/// Print a response as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
