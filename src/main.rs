// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::tracking_service::TrackingService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::tracking_client::TrackingApiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    demo_tracking, health_check, track_batch, track_booking, track_container, track_shipment,
    vessel_position,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    tracing::debug!("Loaded configuration: {:?}", config);
    if config.tracking.uses_placeholder_key() {
        tracing::warn!(
            "TRACKING_API_KEY is not set; live tracking calls will use a placeholder credential"
        );
    }

    // Create provider client (infrastructure layer)
    let client = Arc::new(TrackingApiClient::from_settings(&config.tracking));

    // Create services (application layer)
    let tracking_service = TrackingService::new(client, config.tracking.demo_fallback)
        .with_batch_limits(
            config.tracking.batch_concurrency,
            config.tracking.max_batch_size,
        );

    // Create application state
    let state = Arc::new(AppState { tracking_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/tracking", post(track_shipment))
        .route("/tracking/batch", post(track_batch))
        .route("/tracking/demo", get(demo_tracking))
        .route("/tracking/containers/:number", get(track_container))
        .route("/tracking/bookings/:number", get(track_booking))
        .route("/vessels/:imo", get(vessel_position))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_address.parse()?;
    tracing::info!("Starting freight-tracking service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
