mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::DocumentAnalyzer;
use crate::analysis::catalog::PatternCatalog;
use crate::analysis::document::PdfTextExtractor;
use crate::analysis::registry::RdapRegistry;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OfferGuard API v{}", env!("CARGO_PKG_VERSION"));

    // Pattern catalog is compiled once and shared read-only by every analysis
    let catalog = Arc::new(PatternCatalog::standard().context("Invalid built-in pattern")?);
    info!(
        "Pattern catalog loaded: {} categories, {} suspicious patterns",
        catalog.categories().len(),
        catalog.suspicious().len()
    );

    let registry = RdapRegistry::new(&config.rdap_base_url, config.registry_timeout)
        .context("Failed to build registry HTTP client")?;
    info!(
        "Registry verifier: RDAP at {} (timeout {:?})",
        config.rdap_base_url, config.registry_timeout
    );

    let analyzer = DocumentAnalyzer::new(
        catalog,
        Arc::new(registry),
        Arc::new(PdfTextExtractor),
        config.registry_timeout,
    );

    let cors = match &config.cors_allowed_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("CORS_ALLOWED_ORIGIN is not a valid origin: {origin}"))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        None => CorsLayer::permissive(),
    };

    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
