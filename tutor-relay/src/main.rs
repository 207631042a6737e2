//! LineTutor web server - receives LINE webhooks and replies via Gemini.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use linetutor::web::router;
use linetutor::{AppState, Config, GeminiClient, LineClient, Relay, ResponseGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        port = config.port,
        gemini_model = %config.gemini_model,
        gemini_api_base = %config.gemini_api_base,
        line_api_base = %config.line_api_base,
        generate_timeout_ms = config.generate_timeout_ms,
        reply_timeout_ms = config.reply_timeout_ms,
        "config_loaded"
    );

    let gemini = GeminiClient::new(
        &config.gemini_api_base,
        &config.gemini_model,
        config.gemini_api_key.clone(),
        config.generate_timeout(),
    )?;

    let line = LineClient::new(
        &config.line_api_base,
        config.line_channel_access_token.clone(),
        config.reply_timeout(),
    )?;

    let relay = Relay::new(
        ResponseGenerator::new(Arc::new(gemini), config.generate_timeout()),
        Arc::new(line),
    );

    // Build the router
    let app = router(AppState::new(config.line_channel_secret.as_str(), relay));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
