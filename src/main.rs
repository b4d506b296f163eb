//! Medal Tally Service - Main entry point
//!
//! Binds the award-event socket and the HTTP query surface, wires both to
//! the shared tally state, and runs until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medal_tally::{api, ingest, SharedState};

/// Command-line arguments for medal-tally
#[derive(Parser, Debug)]
#[command(name = "medal-tally")]
#[command(about = "Live medal tally with socket ingress and HTTP/SSE fan-out")]
#[command(version)]
struct Args {
    /// Port for the raw award-event socket
    #[arg(long, default_value = "8080", env = "TALLY_INGEST_PORT")]
    ingest_port: u16,

    /// Port for the HTTP query/subscription API
    #[arg(long, default_value = "4000", env = "TALLY_API_PORT")]
    api_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medal_tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let state = Arc::new(SharedState::new());

    // Award-event socket
    let ingest_listener = ingest::bind(args.ingest_port)
        .await
        .context("Failed to bind award-event socket")?;
    let ingest_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = ingest::run(ingest_listener, ingest_state).await {
            tracing::error!("Award-event socket terminated: {}", e);
        }
    });

    // HTTP query surface
    let app = api::create_router(api::AppState { state });
    let addr = SocketAddr::from(([0, 0, 0, 0], args.api_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind HTTP listener")?;
    info!("Query endpoint ready at http://{}/tally", addr);
    info!("Subscription endpoint ready at http://{}/tally/updates", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
