use anyhow::Context;
use tokio::net::TcpListener;

use patient_portal::{api, config::AppConfig, db, models::AppState, utils};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // initialize tracing
    utils::init_tracing();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let store = db::open_store(&config)
        .await
        .context("Failed to open store")?;
    let app = api::router(AppState::new(store.clone()));

    let listener = TcpListener::bind(config.bind_target())
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr()?;
    tracing::info!("Backend running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
