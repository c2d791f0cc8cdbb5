mod backend;
mod config;
mod errors;
mod quality;
mod routes;
mod state;
mod templates;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::quality::QualityAnalyzer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prompt Studio API v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(&config.backend_api_url, config.backend_timeout_secs)
        .context("failed to build backend HTTP client")?;
    info!(
        "Backend client initialized ({}, timeout {}s)",
        backend.base_url(),
        config.backend_timeout_secs
    );

    let analyzer = QualityAnalyzer::new();
    info!("Quality analyzer loaded with {} rules", analyzer.rules().len());

    let state = AppState {
        analyzer,
        backend: Arc::new(backend),
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
