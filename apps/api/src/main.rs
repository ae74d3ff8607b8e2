mod baseline;
mod config;
mod errors;
mod generation;
mod models;
mod parsing;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::baseline::BaselineStore;
use crate::config::Config;
use crate::render::{DocumentRenderer, PlainTextRenderer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tailor API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Default strategies: scoring={}, optimize={}",
        config.score_strategy, config.optimize_strategy
    );

    // Seed the baseline resume from the built-in sample
    let baseline = BaselineStore::seeded().context("Failed to parse the built-in sample resume")?;

    let renderer: Arc<dyn DocumentRenderer> = Arc::new(PlainTextRenderer::default());
    info!("Document renderer: {}", renderer.name());

    // Build app state
    let state = AppState {
        config: config.clone(),
        baseline,
        renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
