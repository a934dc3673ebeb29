//! # nexsan-server
//!
//! HTTP exporter for Nexsan storage arrays.
//! Prometheus scrapes `/probe?target=...` and each request fetches and
//! translates a fresh status document from the named array.

pub mod metrics;
mod listener;
mod server;
mod state;

pub use listener::bind;
pub use metrics::{ExporterMetrics, ProbeOutcome};
pub use server::{router, ProbeParams};
pub use state::{AppState, SharedState};

use anyhow::Context;
use nexsan_core::ExporterConfig;
use tracing::info;

/// Run the exporter until interrupted
pub async fn run(config: ExporterConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let state = AppState::from_config(&config)?;
    let listener = bind(addr, config.bind_v6only)
        .with_context(|| format!("Failed to listen on {}", addr))?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
