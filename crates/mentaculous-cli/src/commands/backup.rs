//! Backup command implementation.
//!
//! A failed backup is reported but does not fail the command; the local
//! ledger is unaffected either way.

use anyhow::Result;
use mentaculous_ops::{BackupRequest, OpsContext};
use tracing::warn;

use super::print_json;

/// Push the stored ledger records to the backup table.
pub async fn execute(ctx: &OpsContext, user: Option<String>, json: bool) -> Result<()> {
    match ctx.backup(BackupRequest { user_id: user }).await {
        Ok(response) if json => print_json(&response)?,
        Ok(response) => {
            println!(
                "☁️  Backed up {} players ({} bytes) for {}",
                response.players, response.bytes, response.user_id
            );
        }
        Err(e) => {
            warn!(error = %e, "Backup failed");
            eprintln!("❌ Backup failed: {}", e);
        }
    }
    Ok(())
}
