//! # ftgateway
//!
//! HTTP gateway for the France Travail job offers API.
//!
//! ## Environment Variables
//!
//! - `FRANCE_TRAVAIL_CLIENT_ID`, `FRANCE_TRAVAIL_CLIENT_SECRET`: required; the process
//!   refuses to start without them
//! - `PORT`: Server port (defaults to 3000)
//! - `RUST_LOG`: log filter for `env_logger`
//!
//! ## API Endpoints
//!
//! - `GET /`: Banner
//! - `GET /health`: Health check
//! - `GET /offres`: Offer search
//! - `GET /offres/{id}`: Offer detail

use std::net::SocketAddr;

use ftgateway::{
    build_router, get_server_port, AppState, FranceTravailConfig, OffersClient, ResponseCache,
};
use log::{error, info};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Main entry point for the gateway.
///
/// Loads the credentials, builds the router with request tracing, and serves until
/// Ctrl-C is received.
///
/// # Example Usage
///
/// ```bash
/// FRANCE_TRAVAIL_CLIENT_ID=... FRANCE_TRAVAIL_CLIENT_SECRET=... cargo run
///
/// # Run with debug logging on a custom port
/// RUST_LOG=debug PORT=8080 cargo run
/// ```
///
/// # Errors
///
/// Returns an error, and the process exits non-zero, if:
/// - A credential is missing from the environment
/// - The server port cannot be bound
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let config = FranceTravailConfig::from_env().map_err(|e| {
        error!("Refusing to start: {}", e);
        e
    })?;

    let offers = OffersClient::new(config)?;
    let state = AppState::new(offers, ResponseCache::default());

    let app = build_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting ftgateway server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
