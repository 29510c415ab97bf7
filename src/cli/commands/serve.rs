use anyhow::Context;

use crate::config::AppConfig;
use crate::database::Database;
use crate::routes;
use crate::state::AppState;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }
    tracing::info!("Starting driver log API in {:?} mode", config.environment);

    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to DATABASE_URL")?;
    if config.database.auto_migrate {
        db.ensure_schema().await.context("failed to create schema")?;
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::new(config, db.clone())
        .context("invalid security configuration")?;
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
