//! Serve command implementation.
//!
//! Runs the REST API (see `mentaculous-api`) on localhost.

use std::net::SocketAddr;

use anyhow::Result;
use mentaculous_ops::OpsContext;
use tokio::net::TcpListener;
use tracing::info;

/// Serve the API until interrupted.
pub async fn execute(ctx: OpsContext, port: u16) -> Result<()> {
    let players = ctx.ledger().await.len();
    let app = mentaculous_api::create_app(ctx);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, players, "API server listening");

    println!("🚀 Mentaculous API on http://{}/api", addr);
    println!("   Ledger: {} players", players);
    println!("   Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    println!("👋 Server stopped");
    Ok(())
}
