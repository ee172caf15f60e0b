//! Chat Relay Server
//!
//! HTTP relay that forwards chat requests to the OpenAI API so clients never hold the API key

use anyhow::{Context, Result};
use chatrelay::utils::logging::init_logging;
use chatrelay::{create_router, version_info, Settings};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    if settings.has_api_key() {
        info!("🔑 OpenAI API key configured");
    } else {
        warn!("OPENAI_API_KEY is not set, /chat will answer 500 until it is configured");
    }
    if settings.debug {
        info!("Debug mode enabled: {:?}", settings);
    }

    let addr = settings.bind_address();
    let app = create_router(settings)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Chat relay server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Chat endpoint: http://{}/chat", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
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
