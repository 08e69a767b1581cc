use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use translate_gateway::{routes, telemetry, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translate_gateway=info,tower_http=info")),
        )
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    info!(
        "Loaded configuration: {} allowed key(s), telemetry {}",
        config.allowed_keys.len(),
        if config.sentry.dsn.is_some() { "enabled" } else { "disabled" }
    );

    let _sentry = telemetry::init(&config.sentry)?;

    let host: std::net::IpAddr = config
        .httpd
        .host
        .parse()
        .with_context(|| format!("httpd.host is not a valid IP address: {}", config.httpd.host))?;
    let addr = SocketAddr::from((host, config.httpd.port));

    let app_state = AppState::new(config)?;

    info!("Registering routes");
    let app = routes::create_routes(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("API is ready");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
