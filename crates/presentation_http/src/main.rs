//! Taxi fare HTTP server
//!
//! Main entry point for the fare API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::FareService;
use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, MapboxRouteAdapter, init_telemetry};
use presentation_http::{ShutdownOutcome, routes, serve_until, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.telemetry)?;

    info!("Taxi fare server v{} starting...", env!("CARGO_PKG_VERSION"));

    config.validate().context("Refusing to start")?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        zone = %config.zone.name,
        "Configuration loaded"
    );

    let gateway = MapboxRouteAdapter::from_config(&config.mapbox)
        .map_err(|e| anyhow::anyhow!("Failed to initialize route gateway: {e}"))?;

    let fare_service = FareService::new(
        Arc::new(gateway),
        Arc::new(config.tariff.clone()),
        Arc::new(config.zone.clone()),
    );

    let state = AppState::new(fare_service, config.clone());
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    let app = app.layer(cors_layer).layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    match serve_until(listener, app, shutdown_signal(), shutdown_timeout).await? {
        ShutdownOutcome::Drained => info!("Server shutdown complete"),
        ShutdownOutcome::TimedOut => warn!("Server shutdown forced after drain timeout"),
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
