//! Sheetsmith - Backend API for tabletop character sheet management
//!
//! The server:
//! - Owns character sheets (abilities, equipment) in an in-memory store
//! - Serves a REST API for sheet CRUD
//! - Mirrors ability/equipment changes to WebSocket subscribers per character

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetsmith=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sheetsmith");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded, port {}", config.server_port);

    // Initialize application state
    let state = Arc::new(AppState::new(config.clone()));
    tracing::info!("Application state initialized");

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(infrastructure::websocket::ws_handler))
        // Merge REST API routes
        .merge(http::create_routes())
        // Unknown paths get a JSON body, same shape as the route errors
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}
