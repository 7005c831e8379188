mod config;
mod db;
mod errors;
mod generation;
mod models;
mod polisher;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::generation::generator::ReviewGenerator;
use crate::polisher::{GeminiPolisher, NoopPolisher, ReviewPolisher};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Revu API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the review polisher — Gemini when configured, no-op otherwise
    let polisher: Arc<dyn ReviewPolisher> = match &config.gemini_api_key {
        Some(key) => {
            info!("Gemini polisher enabled");
            Arc::new(GeminiPolisher::new(key.clone()))
        }
        None => {
            info!("No GEMINI_API_KEY set — reviews will be served unpolished");
            Arc::new(NoopPolisher)
        }
    };

    // The generator: built-in phrase banks, thread-local RNG
    let generator = Arc::new(ReviewGenerator::with_defaults());

    let state = AppState {
        db,
        generator,
        polisher,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
