//! resonance HTTP server binary.
//!
//! Starts an axum HTTP server that scores prompt/response pairs.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `RESONANCE_BIND` — Bind address (default: 0.0.0.0)
//! - `RUST_LOG` — Tracing filter (default: "info,resonance=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use resonance::config::ServerConfig;
use resonance::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,resonance=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr();

    let app = app_router(AppState::new());

    tracing::info!("resonance server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health      — liveness probe");
    tracing::info!("  POST /api/analyze — score a prompt/response pair");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
