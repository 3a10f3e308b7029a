//! teslad - vehicle-control daemon
//!
//! Serves the development surface (mock vehicle) and, if a VIN is
//! configured, the production surface backed by the vehicle-command backend.
//!
//! Usage:
//!   teslad [--port <port>] [--bind <address>]
//!
//! See `teslad --help` for the environment variables it reads.

mod config;

use std::sync::Arc;

use tesla_api::{create_router, AppState};
use tesla_core::{MockVehicleClient, VehicleClient};
use tesla_fleet::RealVehicleClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Command, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "teslad=info,tesla_api=info,tesla_fleet=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match config::from_env()? {
        Command::Run(config) => config,
        Command::Help => {
            config::print_help();
            return Ok(());
        }
    };

    tracing::info!("Starting teslad (vehicle-control daemon)");

    let dev: Arc<dyn VehicleClient> = Arc::new(MockVehicleClient::new());
    let production = connect_real_client(&config).await;

    if config.api_key.is_none() {
        tracing::warn!("TESLA_API_KEY not set, production routes will answer 500");
    }

    let state = AppState::new(dev, production, config.api_key.clone());
    let app = create_router(state);

    let addr = config.addr();
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

/// Build the real adapter. Failures are logged and leave the production
/// surface answering 503 until restart.
async fn connect_real_client(config: &ServerConfig) -> Option<Arc<dyn VehicleClient>> {
    let Some(vin) = config.vin.as_deref() else {
        tracing::warn!("TESLA_VIN not set, production routes disabled");
        return None;
    };

    tracing::info!(vin, backend = %config.fleet.base_url, "Connecting real vehicle client");
    match RealVehicleClient::connect(vin, &config.fleet).await {
        Ok(client) => {
            tracing::info!(vin = client.vin(), "Real vehicle client ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::error!(vin, error = %e, "Failed to initialize real vehicle client");
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutting down...");
}
