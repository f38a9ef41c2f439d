// API Server Binary Entry Point
//
// Purpose: Start the Axum API server for the demo endpoints
// Usage: cargo run --features api --bin api_server

use regenlab_rust::{create_router, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "regenlab_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let recipe_db = std::env::var("RECIPE_DB").ok();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  RECIPE_DB: {}", recipe_db.as_deref().unwrap_or("(built-in)"));
    tracing::info!("  PORT: {}", port);

    // Initialize application state (loads the protocol table)
    let state = AppState::new(recipe_db.as_deref())?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
