//! Dosette - validation server entry point

use anyhow::Context;
use dosette::{api::create_router, logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    logging::init_logging(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting validation server"
    );

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    let app = create_router();

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Validation endpoint: http://{}/fhir/{{resourceType}}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to install SIGTERM signal handler");
    let sigint = tokio::signal::ctrl_c();

    tokio::select! {
        _ = sigint => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

/// Wait for shutdown signal (SIGINT only on non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
