//! # cropdashd — cropdash daemon
//!
//! Composition root that wires the backend client, the dashboard service,
//! and the HTTP server together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Construct the reqwest backend client
//! - Construct the dashboard service over the shared view store
//! - Prime the store from the backend (tolerating failures) and arm the
//!   auto-refresh timer
//! - Build the axum router, bind, and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use cropdash_adapter_backend_reqwest::HttpMonitorBackend;
use cropdash_adapter_http_axum::state::AppState;
use cropdash_app::polling::PollingController;
use cropdash_app::services::DashboardService;
use cropdash_app::state::DashboardState;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let backend = HttpMonitorBackend::new(config.backend_url());
    let store = Arc::new(RwLock::new(DashboardState::new()));
    let service = Arc::new(DashboardService::new(backend, store));

    // Prime the store; each load tolerates an unreachable backend and the
    // next poll or page view self-heals.
    service.load_status().await;
    if let Err(err) = service.load_relays().await {
        tracing::warn!(error = %err, "initial relay load failed");
    }
    if let Err(err) = service.refresh_general().await {
        tracing::warn!(error = %err, "initial snapshot load failed");
    }
    service.load_thresholds().await;

    let poller = Arc::new(PollingController::new(config.polling_period()));
    poller.restart(Arc::clone(&service));

    let state = AppState::new(service, Arc::clone(&poller));
    let app = cropdash_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(backend = config.backend_url(), "cropdashd listening on http://{bind_addr}");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install SIGINT handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
