//! # folio-api: Binary Entry Point
//!
//! Loads configuration from the environment, connects the store, and serves
//! the API. Missing required configuration stops the process before it
//! binds a port.

use folio_api::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("{e}");
        tracing::error!(
            "set DATABASE_URL (or FOLIO_STORE=memory); mail notification needs \
             MAIL_API_URL, MAIL_API_TOKEN and MAIL_ADDRESS together"
        );
        e
    })?;
    tracing::debug!(?config, "configuration loaded");

    let state = AppState::from_config(&config).await.map_err(|e| {
        tracing::error!("Startup failed: {e}");
        e
    })?;

    let app = folio_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Folio API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
