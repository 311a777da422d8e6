//! Main Entrypoint for the Headway Skill Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the station directory resource.
//! 3. Constructing the transit API client and shared state.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use headway_core::{directory::StationDirectory, transit::WmataClient};
use headway_skill::{config::Config, router::create_router, state::AppState};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load Station Directory ---
    let directory = StationDirectory::from_path(&config.stations_path).with_context(|| {
        format!(
            "Failed to load station directory from {}",
            config.stations_path.display()
        )
    })?;
    info!(stations = directory.len(), "Station directory loaded.");

    // --- 4. Initialize Transit Client ---
    let transit = WmataClient::new(
        &config.wmata_base_url,
        &config.wmata_api_key,
        config.request_timeout,
    )
    .context("Failed to construct transit API client")?;

    let app_state = Arc::new(AppState {
        transit: Arc::new(transit),
        directory: Arc::new(directory),
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        base_url = %config.wmata_base_url,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
